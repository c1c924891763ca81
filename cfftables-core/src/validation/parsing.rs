//! Parsing utilities for the CFF text format
//!
//! Pure parsing of the `<d>-CFF(<t>,<n>)` header and of cell tokens,
//! with no I/O or allocation.

use crate::format::constants::{CLEAR_TOKEN, HEADER_MARKER, HEADER_TERMINATOR, SET_TOKEN};
use crate::format::CffHeader;
use crate::CoreError;

/// Parse a header of the form `<d>-CFF(<t>,<n>)`, optionally followed by `:`
///
/// Surrounding whitespace is ignored.
pub fn parse_header(line: &str) -> Result<CffHeader, CoreError> {
    let line = line.trim();
    let line = line.strip_suffix(HEADER_TERMINATOR).unwrap_or(line);

    let (d_str, rest) = line.split_once(HEADER_MARKER).ok_or(CoreError::InvalidHeader)?;
    let dims = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or(CoreError::InvalidHeader)?;
    let (t_str, n_str) = dims.split_once(',').ok_or(CoreError::InvalidHeader)?;

    let d = parse_usize(d_str)?;
    let t = parse_usize(t_str.trim())?;
    let n = parse_usize(n_str.trim())?;

    if d == 0 {
        return Err(CoreError::InvalidHeader);
    }

    Ok(CffHeader::new(d, t, n))
}

/// Parse one cell token: `1` is set, `-` is clear
pub fn parse_cell(token: &str) -> Result<bool, CoreError> {
    match token {
        SET_TOKEN => Ok(true),
        CLEAR_TOKEN => Ok(false),
        _ => Err(CoreError::InvalidToken),
    }
}

/// Parse a usize from a string with error handling
fn parse_usize(s: &str) -> Result<usize, CoreError> {
    if s.is_empty() {
        return Err(CoreError::InvalidHeader);
    }

    let mut result: usize = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(CoreError::InvalidHeader);
        }

        let digit = (byte - b'0') as usize;

        if result > (usize::MAX - digit) / 10 {
            return Err(CoreError::SizeOverflow);
        }

        result = result * 10 + digit;
    }

    Ok(result)
}
