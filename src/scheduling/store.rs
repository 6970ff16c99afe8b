//! Storage port for the scheduling engine.
//!
//! The engine never touches the database directly; it talks to this trait,
//! wired in at startup. Window semantics: exactly one window may exist per
//! (stylist, date), removal is idempotent, and appointment insertion is
//! atomic with respect to the slot uniqueness guarantee.

use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::db::models::{
    Appointment, Availability, InsertAppointment, InsertAvailability, Stylist,
};
use crate::db::repositories::{
    AppointmentRepository, AvailabilityRepository, StylistRepository,
};
use crate::db::DatabaseError;

use super::error::{SchedulingError, SchedulingResult};

#[async_trait]
pub trait Storage: Send + Sync {
    /// The zero-or-one window for (stylist, date).
    async fn get_window(&self, stylist_id: Uuid, date: Date)
        -> SchedulingResult<Option<Availability>>;

    async fn list_windows(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Availability>>;

    /// Fails with `DuplicateWindow` when a window already exists for the
    /// same (stylist, date).
    async fn insert_window(&self, window: &InsertAvailability) -> SchedulingResult<Availability>;

    /// Idempotent: removing an unknown id succeeds.
    async fn delete_window(&self, id: Uuid) -> SchedulingResult<()>;

    async fn appointments_for_day(
        &self,
        stylist_id: Uuid,
        date: Date,
    ) -> SchedulingResult<Vec<Appointment>>;

    async fn list_appointments(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Appointment>>;

    /// Must reject a second insert for an already-taken (stylist, date,
    /// start) atomically, failing with `SlotTaken`.
    async fn insert_appointment(&self, appointment: &InsertAppointment)
        -> SchedulingResult<Appointment>;

    /// Idempotent: removing an unknown id succeeds.
    async fn delete_appointment(&self, id: Uuid) -> SchedulingResult<()>;

    async fn get_stylist(&self, id: Uuid) -> SchedulingResult<Option<Stylist>>;
}

/// Postgres-backed storage; the unique constraints created by the
/// migrations provide the conflict guarantees the trait promises.
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: DatabaseError) -> SchedulingError {
    SchedulingError::StorageUnavailable(err.to_string())
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_window(
        &self,
        stylist_id: Uuid,
        date: Date,
    ) -> SchedulingResult<Option<Availability>> {
        AvailabilityRepository::find_for_date(&self.pool, stylist_id, date)
            .await
            .map_err(storage_error)
    }

    async fn list_windows(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Availability>> {
        AvailabilityRepository::list_for_stylist(&self.pool, stylist_id)
            .await
            .map_err(storage_error)
    }

    async fn insert_window(&self, window: &InsertAvailability) -> SchedulingResult<Availability> {
        AvailabilityRepository::insert(&self.pool, window)
            .await
            .map_err(|err| match err {
                DatabaseError::Duplicate => SchedulingError::DuplicateWindow,
                other => storage_error(other),
            })
    }

    async fn delete_window(&self, id: Uuid) -> SchedulingResult<()> {
        AvailabilityRepository::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn appointments_for_day(
        &self,
        stylist_id: Uuid,
        date: Date,
    ) -> SchedulingResult<Vec<Appointment>> {
        AppointmentRepository::list_for_day(&self.pool, stylist_id, date)
            .await
            .map_err(storage_error)
    }

    async fn list_appointments(&self, stylist_id: Uuid) -> SchedulingResult<Vec<Appointment>> {
        AppointmentRepository::list_for_stylist(&self.pool, stylist_id)
            .await
            .map_err(storage_error)
    }

    async fn insert_appointment(
        &self,
        appointment: &InsertAppointment,
    ) -> SchedulingResult<Appointment> {
        AppointmentRepository::insert(&self.pool, appointment)
            .await
            .map_err(|err| match err {
                DatabaseError::Duplicate => SchedulingError::SlotTaken,
                other => storage_error(other),
            })
    }

    async fn delete_appointment(&self, id: Uuid) -> SchedulingResult<()> {
        AppointmentRepository::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn get_stylist(&self, id: Uuid) -> SchedulingResult<Option<Stylist>> {
        StylistRepository::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)
    }
}
