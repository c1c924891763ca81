//! The cover-free family entity
//!
//! A [`Cff`] owns its [`BitMatrix`] exclusively together with the cover-free
//! parameter `d`. Values only come out of the named constructors, `copy`,
//! text reading and catalog lookups; there is no empty or default state.

use std::fmt;

use cfftables_core::{
    normalize_index, BitMatrix, CffHeader, Combinations, IncidenceMatrix, MatrixOperations,
};
use log::trace;
use rayon::prelude::*;

use crate::construct::{Construction, ConstructionProvider, StandardEngine};
use crate::error::{Error, Result};
use crate::views::{Cols, Pools, Rows, Subsets};

/// A `d-CFF(t, n)`: `t` rows (ground set) by `n` columns (subsets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cff {
    d: usize,
    matrix: BitMatrix,
}

impl Cff {
    pub(crate) fn from_parts(d: usize, matrix: BitMatrix) -> Result<Self> {
        if d == 0 {
            return Err(Error::invalid("d must be at least 1"));
        }
        Ok(Self { d, matrix })
    }

    /// Build a CFF through any construction provider
    pub fn construct_with<P>(provider: &P, request: &Construction<'_>) -> Result<Self>
    where
        P: ConstructionProvider + ?Sized,
    {
        let output = provider.construct(request)?;
        Self::from_parts(output.d, output.matrix)
    }

    fn construct(request: Construction<'_>) -> Result<Self> {
        Self::construct_with(&StandardEngine, &request)
    }

    // Direct constructions

    /// `d-CFF(t, n)` with every cell clear
    pub fn all_zeros(d: usize, t: usize, n: usize) -> Result<Self> {
        check_d(d)?;
        Self::construct(Construction::AllZeros { d, t, n })
    }

    /// The identity matrix as a `d-CFF(n, n)`
    pub fn identity(d: usize, n: usize) -> Result<Self> {
        check_d(d)?;
        Self::construct(Construction::Identity { d, n })
    }

    /// `1-CFF(s, n)` from the middle layer of the subsets of `0..s`, with `s`
    /// the smallest ground set holding `n` such subsets
    pub fn sperner(n: usize) -> Result<Self> {
        Self::construct(Construction::Sperner { n })
    }

    /// `2-CFF(v, v(v-1)/6)` from a Steiner triple system
    pub fn sts(v: usize) -> Result<Self> {
        Self::construct(Construction::sts(v)?)
    }

    pub fn reed_solomon(q: usize, k: usize) -> Result<Self> {
        Self::construct(Construction::ReedSolomon { q, k })
    }

    pub fn short_reed_solomon(q: usize, k: usize, m: usize) -> Result<Self> {
        Self::construct(Construction::ShortReedSolomon { q, k, m })
    }

    pub fn porat_rothschild(q: usize, k: usize, m: usize) -> Result<Self> {
        Self::construct(Construction::PoratRothschild { q, k, m })
    }

    // Recursive constructions

    /// `d-CFF(t + 1, n + 1)`
    pub fn extend_by_one(base: &Cff) -> Result<Self> {
        Self::construct(Construction::ExtendByOne { base })
    }

    /// Block diagonal sum, `min(d)-CFF(t_a + t_b, n_a + n_b)`
    pub fn add(left: &Cff, right: &Cff) -> Result<Self> {
        Self::construct(Construction::Add { left, right })
    }

    /// Doubles the column count of a 2-CFF
    pub fn double(base: &Cff) -> Result<Self> {
        Self::construct(Construction::double(base)?)
    }

    /// `min(d)-CFF(t_a * t_b, n_a * n_b)`
    pub fn kronecker(left: &Cff, right: &Cff) -> Result<Self> {
        Self::construct(Construction::Kronecker { left, right })
    }

    pub fn optimized_kronecker(outer: &Cff, inner: &Cff, bottom: &Cff) -> Result<Self> {
        Self::construct(Construction::optimized_kronecker(outer, inner, bottom)?)
    }

    // Shape and parameters

    /// Cover-free parameter
    pub fn d(&self) -> usize {
        self.d
    }

    /// Change the claimed cover-free parameter; `verify` uses the new value
    pub fn set_d(&mut self, d: usize) -> Result<()> {
        check_d(d)?;
        self.d = d;
        Ok(())
    }

    /// Number of rows
    pub fn t(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of columns
    pub fn n(&self) -> usize {
        self.matrix.cols()
    }

    pub fn header(&self) -> CffHeader {
        CffHeader::new(self.d, self.t(), self.n())
    }

    /// Read-only access to the underlying matrix
    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    /// `"<d>-CFF(<t>,<n>)"`
    pub fn repr(&self) -> String {
        self.header().to_string()
    }

    // Cell access

    /// Cell `(row, col)` as 0 or 1; negative indices count from the end
    pub fn get(&self, row: isize, col: isize) -> Result<u8> {
        let r = normalize_index(row, self.t()).map_err(|_| Error::index(row, self.t()))?;
        let c = normalize_index(col, self.n()).map_err(|_| Error::index(col, self.n()))?;
        Ok(u8::from(self.matrix.bit(r, c)))
    }

    /// Set cell `(row, col)` to `value`, which must be 0 or 1
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        if value > 1 {
            return Err(Error::invalid(format!("cell value must be 0 or 1, got {value}")));
        }
        if row >= self.t() {
            return Err(Error::index(row as isize, self.t()));
        }
        if col >= self.n() {
            return Err(Error::index(col as isize, self.n()));
        }
        self.matrix.set_bit(row, col, value == 1);
        Ok(())
    }

    /// Number of rows in column `col`
    pub fn weight(&self, col: usize) -> Result<usize> {
        if col >= self.n() {
            return Err(Error::index(col as isize, self.n()));
        }
        Ok(self.matrix.col_count_ones(col))
    }

    /// Number of columns containing row `row`
    pub fn row_weight(&self, row: usize) -> Result<usize> {
        if row >= self.t() {
            return Err(Error::index(row as isize, self.t()));
        }
        Ok(self.matrix.row_count_ones(row))
    }

    /// Fraction of set cells; 0 for an empty matrix
    pub fn density(&self) -> f64 {
        let cells = self.t() * self.n();
        if cells == 0 {
            return 0.0;
        }
        self.matrix.weight() as f64 / cells as f64
    }

    // Views

    pub fn rows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    pub fn cols(&self) -> Cols<'_> {
        Cols::new(self)
    }

    pub fn subsets(&self) -> Subsets<'_> {
        Subsets::new(self)
    }

    pub fn pools(&self) -> Pools<'_> {
        Pools::new(self)
    }

    // Verification and reshaping

    /// Check that no column is covered by the union of any `d` others
    ///
    /// Exhaustive over all `C(n - 1, d)` combinations per column, so only
    /// meant for validation. With `d >= n` there is nothing to check.
    pub fn verify(&self) -> bool {
        let n = self.n();
        if n <= self.d {
            return true;
        }
        let supports: Vec<Vec<u64>> = (0..n).map(|c| self.matrix.column_words(c)).collect();
        (0..n)
            .into_par_iter()
            .all(|col| column_is_free(&supports, col, self.d))
    }

    /// Deep copy with an independent lifetime
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Keep only the first `new_n` columns
    pub fn reduce(&mut self, new_n: usize) -> Result<()> {
        if new_n > self.n() {
            return Err(Error::invalid(format!(
                "cannot reduce {self} to {new_n} columns"
            )));
        }
        self.matrix.truncate_cols(new_n)?;
        Ok(())
    }

    /// Copy with zero rows appended up to `t`
    pub(crate) fn padded_rows(&self, t: usize) -> Result<Self> {
        Ok(Self {
            d: self.d,
            matrix: self.matrix.padded_rows(t)?,
        })
    }
}

fn check_d(d: usize) -> Result<()> {
    if d == 0 {
        return Err(Error::invalid("d must be at least 1"));
    }
    Ok(())
}

/// True if column `col` is not covered by any `k` other columns
fn column_is_free(supports: &[Vec<u64>], col: usize, k: usize) -> bool {
    let target = &supports[col];
    let others: Vec<usize> = (0..supports.len()).filter(|&c| c != col).collect();
    let mut union = vec![0u64; target.len()];
    let mut combos = Combinations::new(others.len(), k);
    while let Some(combo) = combos.next_combination() {
        union.fill(0);
        for &i in combo {
            for (u, w) in union.iter_mut().zip(&supports[others[i]]) {
                *u |= w;
            }
        }
        if target.iter().zip(&union).all(|(t, u)| t & !u == 0) {
            trace!("column {col} covered by {:?}", combo.iter().map(|&i| others[i]).collect::<Vec<_>>());
            return false;
        }
    }
    true
}

impl fmt::Display for Cff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl IncidenceMatrix for Cff {
    fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.matrix.cell(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.t(), self.n())
    }

    fn weight(&self) -> usize {
        self.matrix.weight()
    }
}

impl MatrixOperations for Cff {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_set_get_and_wraparound() {
        let mut cff = Cff::all_zeros(1, 3, 5).unwrap();
        cff.set(2, 4, 1).unwrap();
        assert_eq!(cff.get(2, 4).unwrap(), 1);
        assert_eq!(cff.get(-1, -1).unwrap(), 1);
        assert_eq!(cff.get(-3, 0).unwrap(), 0);
        assert_eq!(cff.get(-4, 0).unwrap_err().kind(), ErrorKind::IndexError);
        assert_eq!(cff.get(0, 5).unwrap_err().kind(), ErrorKind::IndexError);

        assert_eq!(cff.set(0, 0, 2).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(cff.set(3, 0, 1).unwrap_err().kind(), ErrorKind::IndexError);
        cff.set(2, 4, 0).unwrap();
        assert_eq!(cff.get(2, 4).unwrap(), 0);
    }

    #[test]
    fn test_repr_and_display() {
        let cff = Cff::sts(9).unwrap();
        assert_eq!(cff.repr(), "2-CFF(9,12)");
        assert_eq!(format!("{cff}"), "2-CFF(9,12)");
    }

    #[test]
    fn test_d_must_be_positive() {
        assert_eq!(Cff::identity(0, 3).unwrap_err().kind(), ErrorKind::InvalidArgument);
        let mut cff = Cff::identity(1, 3).unwrap();
        assert_eq!(cff.set_d(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(cff.d(), 1);
    }

    #[test]
    fn test_verify_uses_current_d() {
        let mut cff = Cff::sts(7).unwrap();
        assert!(cff.verify());
        cff.set_d(3).unwrap();
        assert!(!cff.verify());

    }

    #[test]
    fn test_verify_without_enough_columns() {
        // fewer than d other columns: no combination can cover anything
        assert!(Cff::all_zeros(2, 3, 1).unwrap().verify());
        assert!(Cff::all_zeros(3, 3, 2).unwrap().verify());
        assert!(Cff::all_zeros(1, 0, 0).unwrap().verify());

        // d = n - 1 still checks the single combination
        let mut pair = Cff::all_zeros(1, 2, 2).unwrap();
        assert!(!pair.verify());
        pair.set(0, 0, 1).unwrap();
        pair.set(1, 1, 1).unwrap();
        assert!(pair.verify());
    }

    #[test]
    fn test_reduce() {
        let mut cff = Cff::sperner(6).unwrap();
        let before: Vec<u8> = (0..4).map(|r| cff.get(r, 2).unwrap()).collect();
        cff.reduce(3).unwrap();
        assert_eq!(cff.n(), 3);
        let after: Vec<u8> = (0..4).map(|r| cff.get(r, 2).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(cff.get(0, 3).unwrap_err().kind(), ErrorKind::IndexError);
        assert_eq!(cff.reduce(4).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Cff::identity(1, 4).unwrap();
        let mut copy = original.copy();
        assert_eq!(copy, original);
        copy.set(0, 1, 1).unwrap();
        assert_eq!(original.get(0, 1).unwrap(), 0);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_weights() {
        let cff = Cff::sts(9).unwrap();
        assert_eq!(cff.weight(0).unwrap(), 3);
        // every point of an STS(9) lies in (v - 1) / 2 triples
        assert_eq!(cff.row_weight(4).unwrap(), 4);
        assert!((cff.density() - 36.0 / 108.0).abs() < 1e-12);
        assert_eq!(cff.weight(12).unwrap_err().kind(), ErrorKind::IndexError);
    }

    #[test]
    fn test_padded_rows() {
        let cff = Cff::identity(2, 3).unwrap();
        let padded = cff.padded_rows(5).unwrap();
        assert_eq!((padded.t(), padded.n(), padded.d()), (5, 3, 2));
        assert_eq!(padded.get(-1, 0).unwrap(), 0);
        assert!(padded.verify());
    }
}
