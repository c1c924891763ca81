//! Error types for bit matrix and format operations

/// Errors that can occur in core matrix and format operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Row or column index out of bounds
    IndexOutOfBounds,
    /// Row pitch smaller than the column count, or an invalid alignment boundary
    InvalidPitch,
    /// Buffer size calculation overflowed
    SizeOverflow,
    /// Malformed `<d>-CFF(<t>,<n>)` header
    InvalidHeader,
    /// Cell token other than `1` or `-`
    InvalidToken,
}

impl CoreError {
    /// Coarse category, used by the facade crate to map onto its own taxonomy
    pub const fn category(&self) -> ErrorCategory {
        match self {
            CoreError::IndexOutOfBounds => ErrorCategory::Index,
            CoreError::InvalidPitch => ErrorCategory::Argument,
            CoreError::SizeOverflow => ErrorCategory::Allocation,
            CoreError::InvalidHeader | CoreError::InvalidToken => ErrorCategory::Format,
        }
    }
}

/// Broad grouping of [`CoreError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Index,
    Argument,
    Allocation,
    Format,
}

impl core::fmt::Display for CoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            CoreError::IndexOutOfBounds => "Index out of bounds",
            CoreError::InvalidPitch => "Invalid row pitch",
            CoreError::SizeOverflow => "Matrix size overflows addressable memory",
            CoreError::InvalidHeader => "Invalid CFF header",
            CoreError::InvalidToken => "Invalid matrix cell token",
        };
        write!(f, "{msg}")
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
