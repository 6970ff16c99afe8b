//! Turns an availability window into the ordered list of bookable start
//! times for that day.
//!
//! Appointments are a fixed 45 minutes with a 15 minute buffer before the
//! next one can begin, so slot starts fall on a 60 minute cadence from the
//! window's start. A slot is only offered when the whole appointment fits
//! inside the window; the window's end time itself is never bookable.

use crate::db::models::Availability;

use super::clock::TimeOfDay;

/// Fixed appointment length in minutes.
pub const APPOINTMENT_MINUTES: u16 = 45;
/// Gap between the end of one appointment and the next bookable start.
pub const BUFFER_MINUTES: u16 = 15;

/// Resolves the bookable start times for a window at the standard cadence.
pub fn resolve(window: &Availability) -> Vec<TimeOfDay> {
    resolve_with(window, APPOINTMENT_MINUTES, BUFFER_MINUTES)
}

/// Resolves bookable start times for an arbitrary duration and buffer.
///
/// Pure and deterministic: the same window and durations always produce the
/// same strictly increasing sequence.
pub fn resolve_with(window: &Availability, slot_minutes: u16, buffer_minutes: u16) -> Vec<TimeOfDay> {
    let step = slot_minutes as u32 + buffer_minutes as u32;
    if step == 0 {
        return Vec::new();
    }

    let end = window.end_time.minutes() as u32;
    let mut cursor = window.start_time.minutes() as u32;
    let mut slots = Vec::new();

    while cursor + slot_minutes as u32 <= end {
        // cursor < end <= 23:59 here, so the conversion cannot fail
        if let Ok(slot) = TimeOfDay::from_minutes(cursor as u16) {
            slots.push(slot);
        }
        cursor += step;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;
    use uuid::Uuid;

    fn window(start: &str, end: &str) -> Availability {
        Availability {
            id: Uuid::new_v4(),
            stylist_id: Uuid::new_v4(),
            date: date!(2024 - 06 - 10),
            start_time: TimeOfDay::parse(start).unwrap(),
            end_time: TimeOfDay::parse(end).unwrap(),
        }
    }

    #[test]
    fn full_day_window_yields_hourly_slots() {
        let slots = resolve(&window("09:00", "17:00"));
        let rendered: Vec<String> = slots.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00"]
        );
    }

    #[test]
    fn window_end_is_not_bookable() {
        // 16:15 is the last start whose 45 minutes still fit before 17:00
        let slots = resolve(&window("16:15", "17:00"));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].to_string(), "16:15");

        assert!(resolve(&window("16:16", "17:00")).is_empty());
    }

    #[test]
    fn window_too_short_for_one_appointment_is_empty() {
        assert!(resolve(&window("09:00", "09:44")).is_empty());
        assert_eq!(resolve(&window("09:00", "09:45")).len(), 1);
    }

    #[test]
    fn resolve_is_idempotent() {
        let w = window("08:30", "12:00");
        assert_eq!(resolve(&w), resolve(&w));
    }

    #[test]
    fn zero_cadence_terminates() {
        assert!(resolve_with(&window("09:00", "17:00"), 0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn slots_fit_inside_window(start in 0u16..1380, len in 1u16..600) {
            let end = (start + len).min(1439);
            prop_assume!(start < end);
            let w = Availability {
                id: Uuid::new_v4(),
                stylist_id: Uuid::new_v4(),
                date: date!(2024 - 06 - 10),
                start_time: TimeOfDay::from_minutes(start).unwrap(),
                end_time: TimeOfDay::from_minutes(end).unwrap(),
            };
            let slots = resolve(&w);
            for slot in &slots {
                prop_assert!(w.start_time <= *slot);
                prop_assert!(slot.minutes() + APPOINTMENT_MINUTES <= end);
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
