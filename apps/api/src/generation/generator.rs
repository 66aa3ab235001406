//! Résumé generation: job description + applicant notes in, a full
//! `DocumentEnvelope` (CV and cover letter) out.
//!
//! One model call per request. Bullets come back as arrays and are
//! normalised by the `Bullets` deserializer like any other import.

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::prompts::GENERATION_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::DocumentEnvelope;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /api/v1/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub job_description: String,
    #[serde(default)]
    pub user_info: String,
    /// Falls back to the current document's language when absent.
    #[serde(default)]
    pub target_language: Option<String>,
}

/// The JSON user message sent to the model.
#[derive(Debug, Serialize)]
pub struct GenerationInput<'a> {
    #[serde(rename = "Job-description")]
    pub job_description: &'a str,
    #[serde(rename = "user-information")]
    pub user_information: &'a str,
    pub language: &'a str,
    pub today: String,
}

impl<'a> GenerationInput<'a> {
    pub fn new(job_description: &'a str, user_information: &'a str, language: &'a str) -> Self {
        Self {
            job_description,
            user_information,
            language,
            today: today_string(),
        }
    }
}

/// e.g. "Mon Oct 19 2026".
fn today_string() -> String {
    Local::now().format("%a %b %d %Y").to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable generation backend, stored as `Arc<dyn ResumeGenerator>` in state.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(&self, input: &GenerationInput<'_>) -> Result<DocumentEnvelope, LlmError>;
}

/// Default backend: a single structured-output LLM call.
pub struct LlmResumeGenerator {
    llm: LlmClient,
}

impl LlmResumeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeGenerator for LlmResumeGenerator {
    async fn generate(&self, input: &GenerationInput<'_>) -> Result<DocumentEnvelope, LlmError> {
        let prompt = serde_json::to_string(input)?;
        info!(
            model = self.llm.model(),
            language = input.language,
            "Generating CV and cover letter"
        );
        self.llm
            .call_json::<DocumentEnvelope>(&prompt, GENERATION_SYSTEM)
            .await
    }
}
