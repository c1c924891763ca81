//! Index and layout validation for packed incidence matrices
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions are arithmetic on indices, buffer sizes and text tokens.

pub mod bounds;
pub mod format;
pub mod parsing;

pub use bounds::{bit_buffer_len, check_index, normalize_index};
pub use format::{align_to_boundary, aligned_pitch};
pub use parsing::{parse_cell, parse_header};
