use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::FontFamily;

const DEFAULT_LLM_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";

/// Application configuration loaded from environment variables.
/// Everything has a default; AI generation stays off without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm_api_key: Option<String>,
    pub llm_api_url: String,
    pub llm_model: String,
    /// Directory holding the NotoSans glyph-subset TTF pairs.
    pub font_dir: Option<PathBuf>,
    pub pdf_font_family: FontFamily,
    /// JSON file backing the profile slots; in-memory only when unset.
    pub profile_store_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let family_name = env_or("PDF_FONT_FAMILY", "NotoSans");
        let pdf_font_family = FontFamily::from_name(&family_name)
            .ok_or_else(|| {
                anyhow!("PDF_FONT_FAMILY '{family_name}' is not a supported font family")
            })?;

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            llm_api_key: optional_env("LLM_API_KEY"),
            llm_api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            font_dir: optional_env("FONT_DIR").map(PathBuf::from),
            pdf_font_family,
            profile_store_path: optional_env("PROFILE_STORE_PATH").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            llm_api_key: None,
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            font_dir: None,
            pdf_font_family: FontFamily::NotoSans,
            profile_store_path: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
