//! Orchestrates the two scheduling use cases — "list bookable times" and
//! "book an appointment" — plus the window plumbing around them, against
//! explicitly injected storage and notification collaborators.

use std::sync::Arc;

use time::Date;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::{
    Appointment, Availability, InsertAppointment, InsertAvailability, NewAppointment,
    NewAvailability,
};
use crate::email::{AppointmentConfirmation, Notifier};

use super::clock::{self, TimeOfDay};
use super::error::{SchedulingError, SchedulingResult};
use super::slots;
use super::store::Storage;
use super::validate::validate_booking;

pub struct SchedulingService {
    store: Arc<dyn Storage>,
    mailer: Arc<dyn Notifier>,
}

impl SchedulingService {
    pub fn new(store: Arc<dyn Storage>, mailer: Arc<dyn Notifier>) -> Self {
        Self { store, mailer }
    }

    /// Bookable start times for a stylist on one day. A day without a
    /// window is an empty list, not an error.
    pub async fn list_bookable_times(
        &self,
        stylist_id: Uuid,
        date: Date,
    ) -> SchedulingResult<Vec<TimeOfDay>> {
        match self.store.get_window(stylist_id, date).await? {
            Some(window) => Ok(slots::resolve(&window)),
            None => Ok(Vec::new()),
        }
    }

    /// Books an appointment at the requested start time.
    ///
    /// Client fields are checked before anything else; the window and the
    /// day's appointments are then read fresh so the validator never works
    /// from stale state. Any race two concurrent requests still have is
    /// settled by the storage layer's slot uniqueness guarantee.
    pub async fn book(&self, request: NewAppointment) -> SchedulingResult<Appointment> {
        request
            .validate()
            .map_err(|err| SchedulingError::InvalidClient(err.to_string()))?;

        let date = clock::parse_date(&request.date)?;
        let start_time = TimeOfDay::parse(&request.start_time)?;

        let window = self.store.get_window(request.stylist_id, date).await?;
        let existing = self
            .store
            .appointments_for_day(request.stylist_id, date)
            .await?;
        let end_time = validate_booking(start_time, window.as_ref(), &existing)?;

        let appointment = self
            .store
            .insert_appointment(&InsertAppointment {
                stylist_id: request.stylist_id,
                client_name: request.client_name,
                client_email: request.client_email,
                date,
                start_time,
                end_time,
            })
            .await?;

        self.send_confirmation(&appointment).await;

        Ok(appointment)
    }

    /// Publishes a stylist's availability window for one day.
    pub async fn publish_window(&self, request: NewAvailability) -> SchedulingResult<Availability> {
        let date = clock::parse_date(&request.date)?;
        let start_time = TimeOfDay::parse(&request.start_time)?;
        let end_time = TimeOfDay::parse(&request.end_time)?;

        if start_time >= end_time {
            return Err(SchedulingError::InvalidWindow);
        }

        self.store
            .insert_window(&InsertAvailability {
                stylist_id: request.stylist_id,
                date,
                start_time,
                end_time,
            })
            .await
    }

    pub async fn withdraw_window(&self, id: Uuid) -> SchedulingResult<()> {
        self.store.delete_window(id).await
    }

    pub async fn windows_for_stylist(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Availability>> {
        self.store.list_windows(stylist_id).await
    }

    pub async fn appointments_for_stylist(
        &self,
        stylist_id: Uuid,
    ) -> SchedulingResult<Vec<Appointment>> {
        self.store.list_appointments(stylist_id).await
    }

    pub async fn cancel_appointment(&self, id: Uuid) -> SchedulingResult<()> {
        self.store.delete_appointment(id).await
    }

    /// Confirmation email is fire and forget: a delivery failure is logged
    /// and never fails the booking.
    async fn send_confirmation(&self, appointment: &Appointment) {
        let stylist_name = match self.store.get_stylist(appointment.stylist_id).await {
            Ok(Some(stylist)) => stylist.display_name,
            Ok(None) => appointment.stylist_id.to_string(),
            Err(err) => {
                warn!(error = %err, "could not load stylist for confirmation email");
                appointment.stylist_id.to_string()
            }
        };

        let confirmation = AppointmentConfirmation {
            client_name: appointment.client_name.clone(),
            client_email: appointment.client_email.clone(),
            date: clock::format_date(appointment.date),
            start_time: appointment.start_time.to_string(),
            end_time: appointment.end_time.to_string(),
            stylist_name,
        };

        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            if let Err(err) = mailer.send_appointment_confirmation(&confirmation).await {
                warn!(
                    error = %err,
                    client = %confirmation.client_email,
                    "failed to send confirmation email"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::db::models::Stylist;
    use crate::email::LoggingMailer;
    use crate::scheduling::validate::overlaps;

    #[derive(Default)]
    struct MemoryState {
        windows: Vec<Availability>,
        appointments: Vec<Appointment>,
        stylists: Vec<Stylist>,
    }

    /// In-memory stand-in honoring the same uniqueness guarantees the
    /// Postgres constraints provide.
    #[derive(Default)]
    struct MemoryStorage {
        state: Mutex<MemoryState>,
    }

    impl MemoryStorage {
        fn with_stylist(stylist: Stylist) -> Self {
            let storage = Self::default();
            storage.state.lock().unwrap().stylists.push(stylist);
            storage
        }
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn get_window(
            &self,
            stylist_id: Uuid,
            date: Date,
        ) -> SchedulingResult<Option<Availability>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .windows
                .iter()
                .find(|w| w.stylist_id == stylist_id && w.date == date)
                .cloned())
        }

        async fn list_windows(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Availability>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .windows
                .iter()
                .filter(|w| w.stylist_id == stylist_id)
                .cloned()
                .collect())
        }

        async fn insert_window(
            &self,
            window: &InsertAvailability,
        ) -> SchedulingResult<Availability> {
            let mut state = self.state.lock().unwrap();
            if state
                .windows
                .iter()
                .any(|w| w.stylist_id == window.stylist_id && w.date == window.date)
            {
                return Err(SchedulingError::DuplicateWindow);
            }
            let stored = Availability {
                id: Uuid::new_v4(),
                stylist_id: window.stylist_id,
                date: window.date,
                start_time: window.start_time,
                end_time: window.end_time,
            };
            state.windows.push(stored.clone());
            Ok(stored)
        }

        async fn delete_window(&self, id: Uuid) -> SchedulingResult<()> {
            let mut state = self.state.lock().unwrap();
            state.windows.retain(|w| w.id != id);
            Ok(())
        }

        async fn appointments_for_day(
            &self,
            stylist_id: Uuid,
            date: Date,
        ) -> SchedulingResult<Vec<Appointment>> {
            let state = self.state.lock().unwrap();
            let mut found: Vec<Appointment> = state
                .appointments
                .iter()
                .filter(|a| a.stylist_id == stylist_id && a.date == date)
                .cloned()
                .collect();
            found.sort_by_key(|a| a.start_time);
            Ok(found)
        }

        async fn list_appointments(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Appointment>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .appointments
                .iter()
                .filter(|a| a.stylist_id == stylist_id)
                .cloned()
                .collect())
        }

        async fn insert_appointment(
            &self,
            appointment: &InsertAppointment,
        ) -> SchedulingResult<Appointment> {
            let mut state = self.state.lock().unwrap();
            if state.appointments.iter().any(|a| {
                a.stylist_id == appointment.stylist_id
                    && a.date == appointment.date
                    && a.start_time == appointment.start_time
            }) {
                return Err(SchedulingError::SlotTaken);
            }
            let stored = Appointment {
                id: Uuid::new_v4(),
                stylist_id: appointment.stylist_id,
                client_name: appointment.client_name.clone(),
                client_email: appointment.client_email.clone(),
                date: appointment.date,
                start_time: appointment.start_time,
                end_time: appointment.end_time,
            };
            state.appointments.push(stored.clone());
            Ok(stored)
        }

        async fn delete_appointment(&self, id: Uuid) -> SchedulingResult<()> {
            let mut state = self.state.lock().unwrap();
            state.appointments.retain(|a| a.id != id);
            Ok(())
        }

        async fn get_stylist(&self, id: Uuid) -> SchedulingResult<Option<Stylist>> {
            let state = self.state.lock().unwrap();
            Ok(state.stylists.iter().find(|s| s.id == id).cloned())
        }
    }

    fn service_with_stylist() -> (SchedulingService, Uuid) {
        let stylist_id = Uuid::new_v4();
        let storage = MemoryStorage::with_stylist(Stylist {
            id: stylist_id,
            username: "ann.the.stylist".into(),
            display_name: "Ann".into(),
            is_stylist: true,
        });
        let service = SchedulingService::new(Arc::new(storage), Arc::new(LoggingMailer));
        (service, stylist_id)
    }

    async fn publish(service: &SchedulingService, stylist_id: Uuid, date: &str) {
        service
            .publish_window(NewAvailability {
                stylist_id,
                date: date.into(),
                start_time: "09:00".into(),
                end_time: "17:00".into(),
            })
            .await
            .unwrap();
    }

    fn booking(stylist_id: Uuid, date: &str, start: &str) -> NewAppointment {
        NewAppointment {
            stylist_id,
            date: date.into(),
            start_time: start.into(),
            client_name: "Ann".into(),
            client_email: "ann@x.com".into(),
        }
    }

    #[tokio::test]
    async fn no_window_means_empty_slot_list_and_no_availability() {
        let (service, stylist_id) = service_with_stylist();
        let date = clock::parse_date("2024-06-10").unwrap();

        let slots = service.list_bookable_times(stylist_id, date).await.unwrap();
        assert!(slots.is_empty());

        let result = service.book(booking(stylist_id, "2024-06-10", "09:00")).await;
        assert_eq!(result, Err(SchedulingError::NoAvailability));
    }

    #[tokio::test]
    async fn booking_succeeds_then_same_slot_is_taken() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let appointment = service
            .book(booking(stylist_id, "2024-06-10", "09:00"))
            .await
            .unwrap();
        assert_eq!(appointment.end_time.to_string(), "09:45");

        let second = service.book(booking(stylist_id, "2024-06-10", "09:00")).await;
        assert_eq!(second, Err(SchedulingError::SlotTaken));
    }

    #[tokio::test]
    async fn unoffered_start_time_is_rejected() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let offered = service
            .list_bookable_times(stylist_id, clock::parse_date("2024-06-10").unwrap())
            .await
            .unwrap();
        assert!(!offered.contains(&TimeOfDay::parse("09:30").unwrap()));

        let result = service.book(booking(stylist_id, "2024-06-10", "09:30")).await;
        assert_eq!(result, Err(SchedulingError::SlotNotOffered));
    }

    #[tokio::test]
    async fn client_fields_are_checked_before_anything_else() {
        let (service, stylist_id) = service_with_stylist();

        let mut request = booking(stylist_id, "2024-06-10", "09:00");
        request.client_name = String::new();
        assert!(matches!(
            service.book(request).await,
            Err(SchedulingError::InvalidClient(_))
        ));

        let mut request = booking(stylist_id, "2024-06-10", "09:00");
        request.client_email = "not-an-email".into();
        assert!(matches!(
            service.book(request).await,
            Err(SchedulingError::InvalidClient(_))
        ));
    }

    #[tokio::test]
    async fn malformed_date_and_time_are_rejected() {
        let (service, stylist_id) = service_with_stylist();

        let result = service.book(booking(stylist_id, "10/06/2024", "09:00")).await;
        assert!(matches!(result, Err(SchedulingError::InvalidTimeFormat(_))));

        let result = service.book(booking(stylist_id, "2024-06-10", "9am")).await;
        assert!(matches!(result, Err(SchedulingError::InvalidTimeFormat(_))));
    }

    #[tokio::test]
    async fn second_window_for_same_day_is_rejected() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let second = service
            .publish_window(NewAvailability {
                stylist_id,
                date: "2024-06-10".into(),
                start_time: "10:00".into(),
                end_time: "12:00".into(),
            })
            .await;
        assert_eq!(second, Err(SchedulingError::DuplicateWindow));
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let (service, stylist_id) = service_with_stylist();

        let result = service
            .publish_window(NewAvailability {
                stylist_id,
                date: "2024-06-10".into(),
                start_time: "17:00".into(),
                end_time: "09:00".into(),
            })
            .await;
        assert_eq!(result, Err(SchedulingError::InvalidWindow));
    }

    #[tokio::test]
    async fn withdrawing_a_window_is_idempotent() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let windows = service.windows_for_stylist(stylist_id).await.unwrap();
        assert_eq!(windows.len(), 1);
        let id = windows[0].id;

        service.withdraw_window(id).await.unwrap();
        // gone already, still fine
        service.withdraw_window(id).await.unwrap();
        assert!(service.windows_for_stylist(stylist_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booked_appointments_never_overlap() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let date = clock::parse_date("2024-06-10").unwrap();
        let offered = service.list_bookable_times(stylist_id, date).await.unwrap();

        // book every offered slot, then try them all again
        for slot in &offered {
            service
                .book(booking(stylist_id, "2024-06-10", &slot.to_string()))
                .await
                .unwrap();
        }
        for slot in &offered {
            let retry = service
                .book(booking(stylist_id, "2024-06-10", &slot.to_string()))
                .await;
            assert_eq!(retry, Err(SchedulingError::SlotTaken));
        }

        let booked = service.appointments_for_stylist(stylist_id).await.unwrap();
        assert_eq!(booked.len(), offered.len());
        for (i, a) in booked.iter().enumerate() {
            for b in &booked[i + 1..] {
                assert!(
                    !overlaps(a.start_time, a.end_time, b.start_time, b.end_time),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[tokio::test]
    async fn cancelling_frees_the_slot() {
        let (service, stylist_id) = service_with_stylist();
        publish(&service, stylist_id, "2024-06-10").await;

        let appointment = service
            .book(booking(stylist_id, "2024-06-10", "10:00"))
            .await
            .unwrap();
        service.cancel_appointment(appointment.id).await.unwrap();

        // slot is bookable again once the appointment is gone
        let rebooked = service
            .book(booking(stylist_id, "2024-06-10", "10:00"))
            .await
            .unwrap();
        assert_eq!(rebooked.start_time.to_string(), "10:00");
    }
}
