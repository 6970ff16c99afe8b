use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{Appointment, NewAppointment};
use crate::error::AppResult;
use crate::scheduling::clock::{self, TimeOfDay};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    date: String,
}

pub async fn list_bookable_times(
    State(state): State<AppState>,
    Path(stylist_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<Vec<TimeOfDay>>> {
    let date = clock::parse_date(&query.date)?;
    let slots = state.scheduling.list_bookable_times(stylist_id, date).await?;
    Ok(Json(slots))
}

pub async fn book_appointment(
    State(state): State<AppState>,
    Json(payload): Json<NewAppointment>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.scheduling.book(payload).await?;
    Ok(Json(appointment))
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Path(stylist_id): Path<Uuid>,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = state.scheduling.appointments_for_stylist(stylist_id).await?;
    Ok(Json(appointments))
}

/// Cancellation is idempotent; the freed slot becomes bookable again.
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    state.scheduling.cancel_appointment(id).await?;
    Ok(Json(json!({ "success": true })))
}
