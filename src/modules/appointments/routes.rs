use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{book_appointment, cancel_appointment, list_appointments, list_bookable_times};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointment", post(book_appointment))
        .route("/appointment/:id", delete(cancel_appointment))
        .route("/appointments/:stylist_id", get(list_appointments))
        .route("/appointments/:stylist_id/slots", get(list_bookable_times))
}
