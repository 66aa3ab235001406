//! Document editing endpoints: read/replace, JSON import/export, entry
//! add/delete and the composed cover letter.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::Response,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::cover_letter::compose_text;
use crate::errors::{AppError, ImportError};
use crate::models::{DocumentEnvelope, EntrySection};
use crate::routes::{download, DownloadQuery};
use crate::session::DeleteOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EntryCountResponse {
    pub section: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub text: String,
}

fn parse_section(segment: &str) -> Result<EntrySection, AppError> {
    EntrySection::from_path(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section '{segment}'")))
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<DocumentEnvelope> {
    Json(state.session.snapshot().await)
}

/// PUT /api/v1/document
pub async fn handle_put_document(
    State(state): State<AppState>,
    Json(envelope): Json<DocumentEnvelope>,
) -> Json<DocumentEnvelope> {
    state.session.replace(envelope).await;
    Json(state.session.snapshot().await)
}

/// POST /api/v1/document/import
///
/// Multipart upload of a saved `.json` document. The file name is checked
/// before the content is read; a failed parse leaves the session unchanged.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentEnvelope>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        .ok_or(ImportError::Empty)?;

    let file_name = field.file_name().unwrap_or_default().to_string();
    if !file_name.to_ascii_lowercase().ends_with(".json") {
        warn!(file_name = %file_name, "Rejected non-JSON import");
        return Err(ImportError::NotJson(file_name).into());
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
    state.session.import_json(&bytes).await?;

    Ok(Json(state.session.snapshot().await))
}

/// GET /api/v1/document/export?name=
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let json = state
        .session
        .export_json()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(download(json, "application/json", &query.file_name("json")))
}

/// POST /api/v1/document/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<EntryCountResponse>, AppError> {
    let section = parse_section(&section)?;
    let count = state.session.add_entry(section).await;
    Ok(Json(EntryCountResponse {
        section: section.as_str(),
        count,
    }))
}

/// DELETE /api/v1/document/:section/entries/:index
///
/// Deleting a section's only entry is a no-op reported in the body.
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path((section, index)): Path<(String, usize)>,
) -> Result<Json<Value>, AppError> {
    let section = parse_section(&section)?;
    match state.session.delete_entry(section, index).await {
        DeleteOutcome::Removed { remaining } => Ok(Json(json!({
            "removed": true,
            "count": remaining
        }))),
        DeleteOutcome::LastEntry => Ok(Json(json!({
            "removed": false,
            "count": 1,
            "warning": format!("The last {} entry cannot be deleted", section.as_str())
        }))),
        DeleteOutcome::OutOfRange { len } => Err(AppError::NotFound(format!(
            "{} has no entry {index} (len {len})",
            section.as_str()
        ))),
    }
}

/// GET /api/v1/cover-letter
pub async fn handle_cover_letter(State(state): State<AppState>) -> Json<CoverLetterResponse> {
    let letter = state.session.cover_letter().await;
    Json(CoverLetterResponse {
        text: compose_text(&letter),
    })
}
