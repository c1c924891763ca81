//! Packed row-major bit matrix
//!
//! Rows are stored back to back at `pitch` bits each, so a row generally does
//! not start on a byte boundary. Bit `(r, c)` sits at offset `r * pitch + c`,
//! in byte `offset >> 3` at bit `offset & 7`.

use alloc::vec;
use alloc::vec::Vec;

use crate::traits::{BitStorage, IncidenceMatrix, MatrixOperations};
use crate::validation::bounds::{bit_buffer_len, check_index};
use crate::validation::format::{aligned_pitch, validate_pitch};
use crate::{CoreError, Result};

/// Row-major packed bit matrix with a configurable row pitch
#[derive(Debug, Clone)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    pitch: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-zero matrix with a tight pitch (`pitch == cols`)
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_pitch(rows, cols, cols)
    }

    /// Create an all-zero matrix with an explicit row pitch in bits
    pub fn with_pitch(rows: usize, cols: usize, pitch: usize) -> Result<Self> {
        validate_pitch(cols, pitch)?;
        let len = bit_buffer_len(rows, pitch)?;
        Ok(Self {
            rows,
            cols,
            pitch,
            data: vec![0u8; len],
        })
    }

    /// Create an all-zero matrix whose pitch is `cols` rounded up to `boundary` bits
    pub fn with_alignment(rows: usize, cols: usize, boundary: usize) -> Result<Self> {
        let pitch = aligned_pitch(cols, boundary)?;
        Self::with_pitch(rows, cols, pitch)
    }

    /// Build a matrix from column supports (ascending or not, duplicates allowed)
    pub fn from_supports<I, S>(rows: usize, supports: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[usize]>,
    {
        let supports: Vec<S> = supports.into_iter().collect();
        let mut matrix = Self::new(rows, supports.len())?;
        for (col, support) in supports.iter().enumerate() {
            for &row in support.as_ref() {
                check_index(row, rows)?;
                matrix.set_bit(row, col, true);
            }
        }
        Ok(matrix)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of logical columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bits per stored row
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Absolute bit offset of `(row, col)`
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.pitch + col
    }

    /// Read a bit without validating against the logical shape
    ///
    /// Only the byte buffer bounds are enforced (by slice indexing).
    #[inline]
    pub fn bit(&self, row: usize, col: usize) -> bool {
        self.bit_at(self.offset(row, col))
    }

    /// Write a bit without validating against the logical shape
    #[inline]
    pub fn set_bit(&mut self, row: usize, col: usize, value: bool) {
        let offset = self.offset(row, col);
        let byte = &mut self.data[offset >> 3];
        let mask = 1u8 << (offset & 7);
        *byte = (*byte & !mask) | (u8::from(value) << (offset & 7));
    }

    /// Checked read
    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        check_index(row, self.rows)?;
        check_index(col, self.cols)?;
        Ok(self.bit(row, col))
    }

    /// Checked write
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        check_index(row, self.rows)?;
        check_index(col, self.cols)?;
        self.set_bit(row, col, value);
        Ok(())
    }

    /// Drop trailing columns; storage is kept, the dropped bits become unreachable
    pub fn truncate_cols(&mut self, cols: usize) -> Result<()> {
        if cols > self.cols {
            return Err(CoreError::IndexOutOfBounds);
        }
        self.cols = cols;
        Ok(())
    }

    /// Copy of this matrix with zero rows appended up to `rows`
    pub fn padded_rows(&self, rows: usize) -> Result<Self> {
        if rows < self.rows {
            return Err(CoreError::IndexOutOfBounds);
        }
        let mut padded = self.clone();
        padded.data.resize(bit_buffer_len(rows, self.pitch)?, 0);
        padded.rows = rows;
        Ok(padded)
    }

    /// Column support packed into 64-bit words, bit `r` of the set is row `r`
    pub fn column_words(&self, col: usize) -> Vec<u64> {
        let mut words = vec![0u64; self.rows.div_ceil(64)];
        for row in 0..self.rows {
            if self.bit(row, col) {
                words[row >> 6] |= 1 << (row & 63);
            }
        }
        words
    }

    /// Number of set bits in a row, within the logical columns
    pub fn row_count_ones(&self, row: usize) -> usize {
        (0..self.cols).filter(|&c| self.bit(row, c)).count()
    }

    /// Number of set bits in a column
    pub fn col_count_ones(&self, col: usize) -> usize {
        (0..self.rows).filter(|&r| self.bit(r, col)).count()
    }
}

impl PartialEq for BitMatrix {
    // Bits past `cols` may be stale after truncation, so compare logical cells
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && (0..self.rows).all(|r| (0..self.cols).all(|c| self.bit(r, c) == other.bit(r, c)))
    }
}

impl Eq for BitMatrix {}

impl BitStorage for BitMatrix {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn row_pitch(&self) -> usize {
        self.pitch
    }
}

impl IncidenceMatrix for BitMatrix {
    fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.get(row, col).ok()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn weight(&self) -> usize {
        (0..self.rows).map(|r| self.row_count_ones(r)).sum()
    }
}

impl MatrixOperations for BitMatrix {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_aligned_pitch_addressing() {
        // 3 columns: row 1 starts at bit 3, row 2 at bit 6, row 3 straddles bytes
        let mut m = BitMatrix::new(4, 3).unwrap();
        assert_eq!(m.size(), 2);

        m.set_bit(2, 2, true); // offset 8
        assert_eq!(m.as_bytes(), &[0x00, 0x01]);
        m.set_bit(1, 0, true); // offset 3
        assert_eq!(m.as_bytes(), &[0x08, 0x01]);

        assert!(m.bit(2, 2));
        assert!(m.bit(1, 0));
        assert!(!m.bit(3, 2));

        m.set_bit(2, 2, false);
        assert_eq!(m.as_bytes(), &[0x08, 0x00]);
    }

    #[test]
    fn test_aligned_pitch() {
        let mut m = BitMatrix::with_alignment(2, 3, 8).unwrap();
        assert_eq!(m.pitch(), 8);
        m.set(1, 0, true).unwrap();
        assert_eq!(m.as_bytes(), &[0x00, 0x01]);

        assert_eq!(
            BitMatrix::with_pitch(2, 5, 4).unwrap_err(),
            CoreError::InvalidPitch
        );
    }

    #[test]
    fn test_checked_access() {
        let mut m = BitMatrix::new(2, 2).unwrap();
        assert_eq!(m.set(2, 0, true), Err(CoreError::IndexOutOfBounds));
        assert_eq!(m.get(0, 2), Err(CoreError::IndexOutOfBounds));
        m.set(1, 1, true).unwrap();
        assert_eq!(m.get(1, 1), Ok(true));
        assert_eq!(m.cell(1, 1), Some(true));
        assert_eq!(m.cell(5, 1), None);
    }

    #[test]
    fn test_truncate_keeps_prefix() {
        let mut m = BitMatrix::from_supports(3, [vec![0usize], vec![1, 2], vec![2]]).unwrap();
        m.truncate_cols(2).unwrap();
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.col_support(1), Some(vec![1, 2]));
        assert_eq!(m.row_support(2), Some(vec![1]));
        assert_eq!(m.truncate_cols(3), Err(CoreError::IndexOutOfBounds));

        let expected = BitMatrix::from_supports(3, [vec![0usize], vec![1, 2]]).unwrap();
        assert_eq!(m, expected);
    }

    #[test]
    fn test_padded_rows_and_words() {
        let m = BitMatrix::from_supports(2, [vec![0usize, 1], vec![1]]).unwrap();
        let p = m.padded_rows(70).unwrap();
        assert_eq!(p.rows(), 70);
        assert_eq!(p.col_support(0), Some(vec![0, 1]));
        assert_eq!(p.column_words(1), vec![0b10, 0]);
        assert_eq!(p.weight(), 3);
        assert!(m.padded_rows(1).is_err());
    }

    #[test]
    fn test_from_supports_rejects_bad_rows() {
        assert_eq!(
            BitMatrix::from_supports(2, [vec![2usize]]).unwrap_err(),
            CoreError::IndexOutOfBounds
        );
    }
}
