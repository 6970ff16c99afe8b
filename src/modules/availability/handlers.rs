use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{Availability, NewAvailability};
use crate::error::{AppError, AppResult};

pub async fn publish_window(
    State(state): State<AppState>,
    Json(payload): Json<NewAvailability>,
) -> AppResult<Json<Availability>> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let window = state.scheduling.publish_window(payload).await?;
    Ok(Json(window))
}

pub async fn list_windows(
    State(state): State<AppState>,
    Path(stylist_id): Path<Uuid>,
) -> AppResult<Json<Vec<Availability>>> {
    let windows = state.scheduling.windows_for_stylist(stylist_id).await?;
    Ok(Json(windows))
}

/// Removal is idempotent; withdrawing an already-removed window still
/// reports success.
pub async fn withdraw_window(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    state.scheduling.withdraw_window(id).await?;
    Ok(Json(json!({ "success": true })))
}
