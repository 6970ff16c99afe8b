use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use validator::Validate;

/// Directory record for a stylist. Credentials and sessions live with the
/// auth collaborator, not here.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Stylist {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub is_stylist: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewStylist {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[serde(default = "default_is_stylist")]
    pub is_stylist: bool,
}

fn default_is_stylist() -> bool {
    true
}
