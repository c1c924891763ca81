#![no_std]

//! cfftables core - packed incidence matrices and text format definitions
//!
//! This crate provides the bit-level storage, index validation and format
//! definitions that the `cfftables` crate builds cover-free families on.
//! Nothing here performs I/O.

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod bit_matrix;
pub mod combinatorics;
pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

#[cfg(feature = "alloc")]
pub use bit_matrix::BitMatrix;
#[cfg(feature = "alloc")]
pub use combinatorics::Combinations;
pub use combinatorics::{binomial, doubling_aux_size, prime_power, sperner_ground_size};
pub use error::*;
pub use format::constants;
pub use format::CffHeader;
pub use traits::*;
pub use validation::{normalize_index, parse_cell, parse_header};
