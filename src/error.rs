use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::scheduling::SchedulingError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref err) => match err {
                DatabaseError::Duplicate => (StatusCode::CONFLICT, "Resource already exists"),
                DatabaseError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input data"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                ),
            },
            AppError::Scheduling(ref err) => match err {
                SchedulingError::InvalidTimeFormat(_)
                | SchedulingError::InvalidTimeRange(_)
                | SchedulingError::InvalidWindow
                | SchedulingError::InvalidClient(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid booking request")
                }
                SchedulingError::SlotNotOffered => {
                    (StatusCode::BAD_REQUEST, "Requested time is not offered")
                }
                SchedulingError::NoAvailability => (
                    StatusCode::NOT_FOUND,
                    "No availability for the requested date",
                ),
                SchedulingError::SlotTaken | SchedulingError::DuplicateWindow => {
                    (StatusCode::CONFLICT, "Scheduling conflict")
                }
                SchedulingError::StorageUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable")
                }
            },
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
