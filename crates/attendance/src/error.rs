use thiserror::Error;

use rollcall_directory::DirectoryError;

use crate::store::StoreError;

/// Failure taxonomy of the attendance pipeline.
///
/// Broadcast failures are deliberately absent: publishing happens after the
/// durable write and is logged, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// Input rejected before any side effect (e.g. empty card number).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The card identifier does not resolve to a member.
    #[error("member not found")]
    MemberNotFound,

    /// A search yielded zero results ("no matches" is surfaced as absence,
    /// not an empty success).
    #[error("no matching log entries")]
    NoMatchFound,

    /// The log store cannot complete a read/write.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The member directory cannot complete a lookup.
    #[error("member directory unavailable")]
    DirectoryUnavailable,
}

impl From<DirectoryError> for AttendanceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => AttendanceError::MemberNotFound,
            DirectoryError::Conflict(_) | DirectoryError::Unavailable => {
                AttendanceError::DirectoryUnavailable
            }
        }
    }
}
