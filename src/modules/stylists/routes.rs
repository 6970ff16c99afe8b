use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{create_stylist, get_stylist, list_stylists};

pub fn stylist_routes() -> Router<AppState> {
    Router::new()
        .route("/stylists", get(list_stylists).post(create_stylist))
        .route("/stylists/:id", get(get_stylist))
}
