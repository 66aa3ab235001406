use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::DocumentEnvelope;
use crate::profiles::{clamp_slot, Profile, SlotLabel};
use crate::state::AppState;

/// GET /api/v1/profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<SlotLabel>> {
    Json(state.profiles.labels().await)
}

/// PUT /api/v1/profiles/:slot
/// Saves the personal fields of the current document. Out-of-range slots clamp.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(slot): Path<i64>,
) -> Result<Json<Vec<SlotLabel>>, AppError> {
    let slot = clamp_slot(slot);
    let (_, doc) = state.session.get_document().await;
    state.profiles.save(slot, Profile::capture(&doc)).await?;
    info!(slot, "Profile saved");
    Ok(Json(state.profiles.labels().await))
}

/// POST /api/v1/profiles/:slot/load
pub async fn handle_load_profile(
    State(state): State<AppState>,
    Path(slot): Path<i64>,
) -> Result<Json<DocumentEnvelope>, AppError> {
    let slot = clamp_slot(slot);
    let profile = state
        .profiles
        .get(slot)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Profile slot {} is empty", slot + 1)))?;
    state.session.apply_profile(&profile).await;
    Ok(Json(state.session.snapshot().await))
}

/// DELETE /api/v1/profiles/:slot
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(slot): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let slot = clamp_slot(slot);
    let removed = state.profiles.delete(slot).await?;
    Ok(Json(json!({ "slot": slot, "removed": removed })))
}
