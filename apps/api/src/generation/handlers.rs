//! Axum route handler for AI generation.

use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{GenerateRequest, GenerationInput};
use crate::models::DocumentEnvelope;
use crate::state::AppState;

/// POST /api/v1/generate
///
/// Generates a CV and cover letter for the job description and replaces the
/// session document with them. The profile image and language survive. On
/// any failure the session is untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<DocumentEnvelope>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    let generator = state.generator.clone().ok_or(AppError::AiDisabled)?;

    let language = match request.target_language {
        Some(language) if !language.trim().is_empty() => language,
        _ => state.session.get_document().await.1.language,
    };

    let input = GenerationInput::new(&request.job_description, &request.user_info, &language);
    let generated = generator.generate(&input).await?;
    info!(name = %generated.cv.name, "Generated document applied");

    Ok(Json(state.session.apply_generated(generated, &language).await))
}
