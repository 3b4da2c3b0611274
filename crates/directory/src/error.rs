use thiserror::Error;

/// Directory-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// A unique field collided with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store cannot complete the operation.
    #[error("directory unavailable")]
    Unavailable,
}
