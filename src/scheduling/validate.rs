//! Accepts or rejects a proposed booking against a stylist's availability
//! and the appointments already on the book.

use crate::db::models::{Appointment, Availability};

use super::clock::TimeOfDay;
use super::error::SchedulingError;
use super::slots;

/// Validates a proposed start time and computes the appointment's end.
///
/// The end is always `proposed_start` plus the fixed appointment length,
/// never derived from the window. Nothing is persisted here; the caller
/// owns the insert.
pub fn validate_booking(
    proposed_start: TimeOfDay,
    window: Option<&Availability>,
    existing: &[Appointment],
) -> Result<TimeOfDay, SchedulingError> {
    let window = window.ok_or(SchedulingError::NoAvailability)?;

    if !slots::resolve(window).contains(&proposed_start) {
        return Err(SchedulingError::SlotNotOffered);
    }

    let computed_end = proposed_start.add_minutes(slots::APPOINTMENT_MINUTES)?;

    for appointment in existing {
        if overlaps(
            proposed_start,
            computed_end,
            appointment.start_time,
            appointment.end_time,
        ) {
            return Err(SchedulingError::SlotTaken);
        }
    }

    Ok(computed_end)
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && b_start < a_end
}
