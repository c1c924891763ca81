//! Abstract interfaces for incidence matrices
//!
//! This module defines the trait abstractions shared by the bit matrix and
//! the CFF entity. Traits are pure interfaces - no concrete implementations.

pub mod backend;
pub mod matrix;

pub use backend::BitStorage;
pub use matrix::IncidenceMatrix;
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
