//! Render endpoints. Layout and rendering are CPU-bound and run on the
//! blocking pool against a snapshot of the document.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::layout::PageLayout;
use crate::render::{layout_document, render_document_docx, render_document_pdf};
use crate::routes::{download, DownloadQuery};
use crate::state::AppState;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Renders the current document to PDF and stores it as the preview, unless
/// the document changed while rendering.
async fn render_current_pdf(state: &AppState) -> Result<Bytes, AppError> {
    let (revision, doc) = state.session.get_document().await;
    let fonts = state.fonts.clone();
    let family = state.config.pdf_font_family;

    let pdf = tokio::task::spawn_blocking(move || render_document_pdf(&doc, &fonts, family))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed rendering PDF: {e}"))
        })??;

    let pdf = Bytes::from(pdf);
    if !state.session.store_preview(revision, pdf.clone()).await {
        debug!(revision, "Document changed during render; preview not stored");
    }
    Ok(pdf)
}

/// GET /api/v1/render/layout
pub async fn handle_layout(State(state): State<AppState>) -> Result<Json<PageLayout>, AppError> {
    let (_, doc) = state.session.get_document().await;
    let fonts = state.fonts.clone();
    let family = state.config.pdf_font_family;

    let layout = tokio::task::spawn_blocking(move || layout_document(&doc, &fonts, family))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?;
    Ok(Json(layout))
}

/// POST /api/v1/render/pdf?name=
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let pdf = render_current_pdf(&state).await?;
    Ok(download(pdf, "application/pdf", &query.file_name("pdf")))
}

/// GET /api/v1/render/preview
///
/// Serves the stored preview inline, rendering one first if there is none.
pub async fn handle_preview(State(state): State<AppState>) -> Result<Response, AppError> {
    let pdf = match state.session.preview().await {
        Some(pdf) => pdf,
        None => render_current_pdf(&state).await?,
    };
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
}

/// POST /api/v1/render/docx?name=
pub async fn handle_render_docx(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let (_, doc) = state.session.get_document().await;
    let docx = tokio::task::spawn_blocking(move || render_document_docx(&doc))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed rendering DOCX: {e}"))
        })??;
    Ok(download(docx, DOCX_MIME, &query.file_name("docx")))
}
