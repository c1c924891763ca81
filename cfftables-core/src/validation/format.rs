//! Row pitch layout helpers
//!
//! Rows are packed back to back at `pitch` bits each. A tight pitch equals
//! the column count; an aligned pitch rounds it up to a power-of-two boundary.

use crate::CoreError;

/// Align an offset to a specific boundary
///
/// `boundary` must be a power of two.
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Validate that a boundary is a power of 2
pub const fn validate_alignment_boundary(boundary: usize) -> Result<(), CoreError> {
    if boundary == 0 || (boundary & (boundary - 1)) != 0 {
        return Err(CoreError::InvalidPitch);
    }
    Ok(())
}

/// Row pitch for `cols` columns rounded up to `boundary` bits
pub const fn aligned_pitch(cols: usize, boundary: usize) -> Result<usize, CoreError> {
    if let Err(e) = validate_alignment_boundary(boundary) {
        return Err(e);
    }
    if cols > usize::MAX - boundary {
        return Err(CoreError::SizeOverflow);
    }
    Ok(align_to_boundary(cols, boundary))
}

/// Validate that a pitch can hold a row of `cols` bits
pub const fn validate_pitch(cols: usize, pitch: usize) -> Result<(), CoreError> {
    if pitch < cols {
        return Err(CoreError::InvalidPitch);
    }
    Ok(())
}
