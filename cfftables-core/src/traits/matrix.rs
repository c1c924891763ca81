//! Core matrix abstraction traits
//!
//! Format-agnostic access to a binary incidence matrix whose rows are the
//! ground set and whose columns are the subsets.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Binary incidence matrix with checked cell access
pub trait IncidenceMatrix {
    /// Get the cell at `(row, col)`
    ///
    /// Returns `None` if the position is out of bounds.
    fn cell(&self, row: usize, col: usize) -> Option<bool>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of set cells
    fn weight(&self) -> usize {
        let (rows, cols) = self.dimensions();
        (0..rows)
            .map(|r| (0..cols).filter(|&c| self.cell(r, c) == Some(true)).count())
            .sum()
    }
}

/// Extension trait for row and column supports (requires alloc feature)
#[cfg(feature = "alloc")]
pub trait MatrixOperations: IncidenceMatrix {
    /// Ascending row indices set in a column
    fn col_support(&self, col: usize) -> Option<Vec<usize>> {
        let (rows, cols) = self.dimensions();
        if col >= cols {
            return None;
        }
        Some((0..rows).filter(|&r| self.cell(r, col) == Some(true)).collect())
    }

    /// Ascending column indices set in a row
    fn row_support(&self, row: usize) -> Option<Vec<usize>> {
        let (rows, cols) = self.dimensions();
        if row >= rows {
            return None;
        }
        Some((0..cols).filter(|&c| self.cell(row, c) == Some(true)).collect())
    }
}
