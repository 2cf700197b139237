use thiserror::Error;

/// Failure taxonomy for the attendance ledger. Mapped to HTTP statuses at
/// the API layer; never retried server-side.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Employee not found")]
    NotFound,

    #[error("This device is not authorized for attendance")]
    Forbidden,

    #[error("Attendance already completed for today")]
    AlreadyCompleted,

    /// A concurrent punch for the same employee and day won the race.
    #[error("Attendance was updated by another request, please retry")]
    Conflict,

    #[error("{0}")]
    Validation(String),

    #[error("Attendance store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}
