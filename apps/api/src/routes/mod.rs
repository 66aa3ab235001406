pub mod document;
pub mod health;
pub mod i18n;
pub mod profiles;
pub mod render;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;

use crate::generation::handlers as generation;
use crate::state::AppState;

const DEFAULT_DOWNLOAD_NAME: &str = "resume";

/// `?name=` on download endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub name: Option<String>,
}

impl DownloadQuery {
    /// `<name>.<extension>`, with the name reduced to filename-safe characters.
    pub fn file_name(&self, extension: &str) -> String {
        let stem = self.name.as_deref().map(sanitize_file_stem).unwrap_or_default();
        let stem = if stem.is_empty() {
            DEFAULT_DOWNLOAD_NAME
        } else {
            stem.as_str()
        };
        format!("{stem}.{extension}")
    }
}

fn sanitize_file_stem(name: &str) -> String {
    let name = name.trim();
    let name = name
        .rsplit_once('.')
        .filter(|(_, ext)| matches!(ext.to_ascii_lowercase().as_str(), "json" | "pdf" | "docx"))
        .map_or(name, |(stem, _)| stem);
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.'))
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string()
}

/// Attachment response with the given MIME type and file name.
pub(crate) fn download(body: impl IntoResponse, content_type: &str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route(
            "/api/v1/document",
            get(document::handle_get_document).put(document::handle_put_document),
        )
        .route("/api/v1/document/import", post(document::handle_import))
        .route("/api/v1/document/export", get(document::handle_export))
        .route(
            "/api/v1/document/:section/entries",
            post(document::handle_add_entry),
        )
        .route(
            "/api/v1/document/:section/entries/:index",
            delete(document::handle_delete_entry),
        )
        .route("/api/v1/cover-letter", get(document::handle_cover_letter))
        // Rendering
        .route("/api/v1/render/layout", get(render::handle_layout))
        .route("/api/v1/render/pdf", post(render::handle_render_pdf))
        .route("/api/v1/render/preview", get(render::handle_preview))
        .route("/api/v1/render/docx", post(render::handle_render_docx))
        // AI generation
        .route("/api/v1/generate", post(generation::handle_generate))
        // Profiles
        .route("/api/v1/profiles", get(profiles::handle_list_profiles))
        .route(
            "/api/v1/profiles/:slot",
            put(profiles::handle_save_profile).delete(profiles::handle_delete_profile),
        )
        .route(
            "/api/v1/profiles/:slot/load",
            post(profiles::handle_load_profile),
        )
        // Localization
        .route("/api/v1/i18n/:language", get(i18n::handle_labels))
        .with_state(state)
}
