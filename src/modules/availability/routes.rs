use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{list_windows, publish_window, withdraw_window};

pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/availability", post(publish_window))
        .route(
            "/availability/:id",
            get(list_windows).delete(withdraw_window),
        )
}
