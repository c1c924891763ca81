//! Index bounds and buffer size validation
//!
//! Read APIs accept signed indices and wrap negatives once, Python style.
//! Everything here is pure arithmetic with overflow protection.

use crate::CoreError;

/// Normalize a possibly negative index against an axis length
///
/// A negative index has the axis length added once; the result must then
/// fall in `0..len`.
pub const fn normalize_index(index: isize, len: usize) -> Result<usize, CoreError> {
    if index >= 0 {
        return check_index(index as usize, len);
    }

    let back = index.unsigned_abs();
    if back > len {
        return Err(CoreError::IndexOutOfBounds);
    }

    Ok(len - back)
}

/// Validate a non-negative index against an axis length
pub const fn check_index(index: usize, len: usize) -> Result<usize, CoreError> {
    if index >= len {
        return Err(CoreError::IndexOutOfBounds);
    }
    Ok(index)
}

/// Number of bytes needed to hold `rows` rows of `pitch` bits
///
/// Rejects sizes whose bit count would not fit in `usize`.
pub const fn bit_buffer_len(rows: usize, pitch: usize) -> Result<usize, CoreError> {
    let bits = match rows.checked_mul(pitch) {
        Some(bits) => bits,
        None => return Err(CoreError::SizeOverflow),
    };

    // Offsets are computed in bits; keep headroom for `offset + 7`
    if bits > usize::MAX - 7 {
        return Err(CoreError::SizeOverflow);
    }

    Ok(bits.div_ceil(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_index() {
        assert_eq!(normalize_index(0, 4), Ok(0));
        assert_eq!(normalize_index(3, 4), Ok(3));
        assert_eq!(normalize_index(-1, 4), Ok(3));
        assert_eq!(normalize_index(-4, 4), Ok(0));

        assert_eq!(normalize_index(4, 4), Err(CoreError::IndexOutOfBounds));
        assert_eq!(normalize_index(-5, 4), Err(CoreError::IndexOutOfBounds));
        assert_eq!(normalize_index(0, 0), Err(CoreError::IndexOutOfBounds));
        assert_eq!(normalize_index(-1, 0), Err(CoreError::IndexOutOfBounds));
        assert_eq!(
            normalize_index(isize::MIN, 4),
            Err(CoreError::IndexOutOfBounds)
        );
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, 1), Ok(0));
        assert_eq!(check_index(1, 1), Err(CoreError::IndexOutOfBounds));
    }

    #[test]
    fn test_bit_buffer_len() {
        assert_eq!(bit_buffer_len(0, 10), Ok(0));
        assert_eq!(bit_buffer_len(1, 1), Ok(1));
        assert_eq!(bit_buffer_len(3, 5), Ok(2)); // 15 bits
        assert_eq!(bit_buffer_len(4, 4), Ok(2));
        assert_eq!(bit_buffer_len(9, 12), Ok(14)); // 108 bits

        assert_eq!(
            bit_buffer_len(usize::MAX, 2),
            Err(CoreError::SizeOverflow)
        );
        assert_eq!(
            bit_buffer_len(1, usize::MAX),
            Err(CoreError::SizeOverflow)
        );
    }
}
