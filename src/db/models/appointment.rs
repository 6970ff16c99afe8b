use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::Date;
use validator::Validate;

use crate::scheduling::clock::TimeOfDay;

/// A booked 45-minute appointment. [start_time, end_time) always lies
/// inside the stylist's availability window for that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub stylist_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    #[serde(with = "super::iso_date")]
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAppointment {
    pub stylist_id: Uuid,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub client_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub client_email: String,
}

/// Validated appointment with its computed end time, ready for the
/// storage layer.
#[derive(Debug, Clone)]
pub struct InsertAppointment {
    pub stylist_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}
