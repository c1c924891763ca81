//! Error taxonomy for CFF operations
//!
//! Every failure surfaces immediately; nothing is retried internally.

use cfftables_core::{CoreError, ErrorCategory};
use thiserror::Error;

use crate::construct::ConstructionError;

/// Result type for CFF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by CFF, view, construction and catalog operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-contract parameters
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Row, column or view index outside bounds after wraparound
    #[error("index {index} out of range for axis of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// The construction engine or the matrix allocator produced nothing
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// The catalog has no entry for a valid request
    #[error("not found: {0}")]
    NotFound(String),

    /// The serialization target could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text input is not a well-formed CFF dump
    #[error("malformed CFF text: {0}")]
    Parse(String),
}

/// Discriminant of [`Error`], convenient for matching in callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IndexError,
    AllocationError,
    NotFound,
    IoError,
    ParseError,
}

impl Error {
    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexError,
            Error::Allocation(_) => ErrorKind::AllocationError,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Io(_) => ErrorKind::IoError,
            Error::Parse(_) => ErrorKind::ParseError,
        }
    }

    pub(crate) fn index(index: isize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err.category() {
            ErrorCategory::Index => Error::InvalidArgument(err.to_string()),
            ErrorCategory::Argument => Error::InvalidArgument(err.to_string()),
            ErrorCategory::Allocation => Error::Allocation(err.to_string()),
            ErrorCategory::Format => Error::Parse(err.to_string()),
        }
    }
}

impl From<ConstructionError> for Error {
    fn from(err: ConstructionError) -> Self {
        Error::Allocation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(
            Error::from(CoreError::SizeOverflow).kind(),
            ErrorKind::AllocationError
        );
        assert_eq!(
            Error::from(CoreError::InvalidToken).kind(),
            ErrorKind::ParseError
        );
        assert_eq!(
            Error::from(CoreError::InvalidPitch).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_display() {
        let err = Error::index(-7, 4);
        assert_eq!(err.to_string(), "index -7 out of range for axis of length 4");
        assert_eq!(err.kind(), ErrorKind::IndexError);
    }
}
