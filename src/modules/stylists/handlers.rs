use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewStylist, Stylist};
use crate::db::repositories::StylistRepository;
use crate::error::{AppError, AppResult};

pub async fn create_stylist(
    State(state): State<AppState>,
    Json(payload): Json<NewStylist>,
) -> AppResult<Json<Stylist>> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let stylist = StylistRepository::insert(&state.db, &payload).await?;
    Ok(Json(stylist))
}

pub async fn get_stylist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Stylist>> {
    let stylist = StylistRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No stylist with id {id}")))?;
    Ok(Json(stylist))
}

pub async fn list_stylists(State(state): State<AppState>) -> AppResult<Json<Vec<Stylist>>> {
    let stylists = StylistRepository::list_stylists(&state.db).await?;
    Ok(Json(stylists))
}
