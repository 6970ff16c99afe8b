mod appointment_repository;
mod availability_repository;
mod stylist_repository;

pub use appointment_repository::AppointmentRepository;
pub use availability_repository::AvailabilityRepository;
pub use stylist_repository::StylistRepository;

use crate::db::DatabaseError;
use crate::scheduling::clock::TimeOfDay;

/// Maps a driver error, turning unique-constraint conflicts into
/// `DatabaseError::Duplicate` so callers can react to the expected case.
pub(crate) fn into_database_error(err: sqlx::Error) -> DatabaseError {
    if matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()) {
        DatabaseError::Duplicate
    } else {
        DatabaseError::Sqlx(err)
    }
}

/// Times are persisted as zero-padded `HH:MM` text; a row that fails to
/// parse back indicates corruption, not caller error.
pub(crate) fn parse_stored_time(value: &str) -> Result<TimeOfDay, DatabaseError> {
    TimeOfDay::parse(value)
        .map_err(|_| DatabaseError::InvalidInput(format!("stored time {value:?} is not HH:MM")))
}
