//! cfftables - cover-free families on packed bit matrices
//!
//! A `d`-cover-free family `d-CFF(t, n)` is a `t x n` binary matrix in which
//! no column's support is contained in the union of the supports of any `d`
//! other columns. Read as a group-testing design, rows are tests (pools) and
//! columns are items.
//!
//! ## Architecture
//!
//! - **cfftables-core**: bit storage, text format definitions, index
//!   validation and counting helpers (`no_std`, no I/O)
//! - **cfftables**: the [`Cff`] entity, its [`views`], the construction
//!   engine, text I/O and the [`CffTable`] catalog
//!
//! ## Quick Start
//!
//! ```rust
//! use cfftables::{Cff, CffTable};
//!
//! fn example() -> cfftables::Result<()> {
//!     let sts = Cff::sts(9)?;
//!     assert_eq!(sts.to_string(), "2-CFF(9,12)");
//!     assert!(sts.verify());
//!
//!     // which tests does item 3 take part in?
//!     let tests = sts.subsets().get(3)?;
//!     assert_eq!(tests.len(), 3);
//!
//!     let table = CffTable::new(3, 40, 1000)?;
//!     let design = table.get_by_n(2, 30, true)?;
//!     assert_eq!(design.n(), 30);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod cff;
pub mod construct;
pub mod error;
pub mod io;
pub mod views;

// Re-export core abstractions and format definitions
pub use cfftables_core::{
    // Storage and traits
    BitMatrix, BitStorage, IncidenceMatrix, MatrixOperations,
    // Format definitions
    CffHeader,
    // Counting helpers
    binomial, doubling_aux_size, sperner_ground_size,
};

pub use catalog::{CatalogEntry, CffTable, PlannerConfig, Recipe};
pub use cff::Cff;
pub use construct::{
    Construction, ConstructionError, ConstructionProvider, EngineOutput, StandardEngine,
};
pub use error::{Error, ErrorKind, Result};
pub use views::{Cols, Pools, Rows, Subsets, View, ViewIter};
