use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::Date;
use validator::Validate;

use crate::scheduling::clock::TimeOfDay;

/// A stylist-declared window on one calendar day during which bookings are
/// allowed. At most one window exists per (stylist, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Uuid,
    pub stylist_id: Uuid,
    #[serde(with = "super::iso_date")]
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAvailability {
    pub stylist_id: Uuid,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
}

/// Fully parsed window, ready for the storage layer.
#[derive(Debug, Clone)]
pub struct InsertAvailability {
    pub stylist_id: Uuid,
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}
