use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Time out of range: {0}")]
    InvalidTimeRange(String),

    #[error("Window start must be before window end")]
    InvalidWindow,

    #[error("An availability window already exists for this date")]
    DuplicateWindow,

    #[error("Stylist has no availability on the requested date")]
    NoAvailability,

    #[error("Requested start time is not an offered slot")]
    SlotNotOffered,

    #[error("Slot is already booked")]
    SlotTaken,

    #[error("Invalid client details: {0}")]
    InvalidClient(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
