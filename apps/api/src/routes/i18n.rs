use std::collections::BTreeMap;

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::i18n::{dictionary, supported_languages, DEFAULT_LANGUAGE};

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    /// The language the labels are actually in.
    pub language: &'static str,
    pub labels: BTreeMap<&'static str, &'static str>,
}

/// GET /api/v1/i18n/:language
pub async fn handle_labels(Path(language): Path<String>) -> Json<LabelsResponse> {
    let resolved = supported_languages()
        .iter()
        .copied()
        .find(|l| *l == language)
        .unwrap_or(DEFAULT_LANGUAGE);
    Json(LabelsResponse {
        language: resolved,
        labels: dictionary(resolved),
    })
}
