//! Tokens of the CFF text format
//!
//! Existing catalogs of generated tables depend on these exact strings.

/// Token written for a set cell
pub const SET_TOKEN: &str = "1";

/// Token written for a clear cell
pub const CLEAR_TOKEN: &str = "-";

/// Separator between cells of a row
pub const CELL_SEPARATOR: &str = " ";

/// Marker between `d` and the dimensions in a header
pub const HEADER_MARKER: &str = "-CFF";

/// Terminator of the header line in a text dump
pub const HEADER_TERMINATOR: char = ':';
