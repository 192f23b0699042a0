use thiserror::Error;

use crate::core::error_collection::{ErrorCollection, RowError};

/// Error type definitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column index out of bounds: index {index}, columns {size}")]
    ColumnOutOfBounds { index: usize, size: usize },

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Cast error: {0}")]
    Cast(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Parallel processing error: {0}")]
    Parallel(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Returned by a per-row function to stop a bulk operation immediately.
    #[error("operation halted: {0}")]
    Halted(String),

    #[error(transparent)]
    Row(Box<RowError>),

    #[error(transparent)]
    Rows(ErrorCollection),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for `Cancelled` and `DeadlineExceeded`.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }

    /// Returns true if `target` is this error or is wrapped by it.
    ///
    /// Row errors are unwrapped to their cause and collections are searched
    /// member by member.
    pub fn is(&self, target: &Error) -> bool {
        if self == target {
            return true;
        }
        match self {
            Error::Row(row_error) => row_error.source.is(target),
            Error::Rows(collection) => collection.contains(target),
            _ => false,
        }
    }
}

impl From<RowError> for Error {
    fn from(err: RowError) -> Self {
        Error::Row(Box::new(err))
    }
}

impl From<ErrorCollection> for Error {
    fn from(errors: ErrorCollection) -> Self {
        Error::Rows(errors)
    }
}
