//! Text format definitions for serialized cover-free families
//!
//! This module contains pure data structure definitions for the text dump.
//! No I/O operations - only format definitions.

pub mod constants;
pub mod header;

pub use header::CffHeader;
