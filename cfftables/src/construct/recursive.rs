//! Recursive constructions that combine existing CFFs into larger ones
//!
//! Inputs are only read; every result is freshly allocated.

use cfftables_core::combinatorics::middle_binomial;
use cfftables_core::{BitMatrix, Combinations};

use super::{allocate, ConstructionError, EngineOutput};
use crate::cff::Cff;

type EngineResult = std::result::Result<EngineOutput, ConstructionError>;

/// Copy `src` into `dst` with its top-left corner at `(row, col)`
fn blit(dst: &mut BitMatrix, src: &BitMatrix, row: usize, col: usize) {
    for r in 0..src.rows() {
        for c in 0..src.cols() {
            if src.bit(r, c) {
                dst.set_bit(row + r, col + c, true);
            }
        }
    }
}

/// Copy column `src_col` of `src` into column `dst_col` of `dst`, starting at `row`
fn blit_column(dst: &mut BitMatrix, src: &BitMatrix, src_col: usize, row: usize, dst_col: usize) {
    for r in 0..src.rows() {
        if src.bit(r, src_col) {
            dst.set_bit(row + r, dst_col, true);
        }
    }
}

fn grow(construction: &'static str, a: usize, b: usize) -> std::result::Result<usize, ConstructionError> {
    a.checked_add(b).ok_or(ConstructionError::TooLarge(construction))
}

fn scale(construction: &'static str, a: usize, b: usize) -> std::result::Result<usize, ConstructionError> {
    a.checked_mul(b).ok_or(ConstructionError::TooLarge(construction))
}

/// `d-CFF(t, n)` to `d-CFF(t + 1, n + 1)`: the new column owns the new row
pub(super) fn extend_by_one(base: &Cff) -> EngineResult {
    let (t, n) = (base.t(), base.n());
    let mut matrix = allocate(
        "extend_by_one",
        grow("extend_by_one", t, 1)?,
        grow("extend_by_one", n, 1)?,
    )?;
    blit(&mut matrix, base.matrix(), 0, 0);
    matrix.set_bit(t, n, true);
    Ok(EngineOutput::new(base.d(), matrix))
}

/// Block diagonal sum
pub(super) fn add(left: &Cff, right: &Cff) -> EngineResult {
    let mut matrix = allocate(
        "add",
        grow("add", left.t(), right.t())?,
        grow("add", left.n(), right.n())?,
    )?;
    blit(&mut matrix, left.matrix(), 0, 0);
    blit(&mut matrix, right.matrix(), left.t(), left.n());
    Ok(EngineOutput::new(left.d().min(right.d()), matrix))
}

/// Doubling of a 2-CFF
///
/// With `s` the auxiliary size rounded up to odd and `A_i` the `i`-th
/// `⌊s/2⌋`-subset of `0..s` in lexicographic order, column `i` is the base
/// column on top of `A_i ∪ {s}` and column `n + i` is the base column on top
/// of the complement `{0..s} \ A_i`. The result is a `2-CFF(t + s + 1, 2n)`.
pub(super) fn double(base: &Cff, aux_size: usize) -> EngineResult {
    const NAME: &str = "double";
    if base.d() != 2 {
        return Err(ConstructionError::unsupported(
            NAME,
            format!("input must be a 2-CFF, got {base}"),
        ));
    }
    let s = aux_size | 1;
    let n = base.n();
    if middle_binomial(s) < n {
        return Err(ConstructionError::unsupported(
            NAME,
            format!("auxiliary size {aux_size} too small for {n} columns"),
        ));
    }

    let t = base.t();
    let mut matrix = allocate(NAME, grow(NAME, t, s + 1)?, scale(NAME, n, 2)?)?;
    blit(&mut matrix, base.matrix(), 0, 0);
    blit(&mut matrix, base.matrix(), 0, n);

    let mut subsets = Combinations::new(s, s / 2);
    for i in 0..n {
        let Some(subset) = subsets.next_combination() else {
            break;
        };
        let mut members = subset.iter().copied().peekable();
        for p in 0..s {
            if members.peek() == Some(&p) {
                members.next();
                matrix.set_bit(t + p, i, true);
            } else {
                matrix.set_bit(t + p, n + i, true);
            }
        }
        matrix.set_bit(t + s, i, true);
    }
    Ok(EngineOutput::new(2, matrix))
}

/// Kronecker product: column `i * n_r + j` is the product of left column `i`
/// and right column `j`
pub(super) fn kronecker(left: &Cff, right: &Cff) -> EngineResult {
    const NAME: &str = "kronecker";
    let (tl, nl) = (left.t(), left.n());
    let (tr, nr) = (right.t(), right.n());
    let mut matrix = allocate(NAME, scale(NAME, tl, tr)?, scale(NAME, nl, nr)?)?;

    let (lm, rm) = (left.matrix(), right.matrix());
    for i in 0..nl {
        for a in (0..tl).filter(|&a| lm.bit(a, i)) {
            for j in 0..nr {
                for b in (0..tr).filter(|&b| rm.bit(b, j)) {
                    matrix.set_bit(a * tr + b, i * nr + j, true);
                }
            }
        }
    }
    Ok(EngineOutput::new(left.d().min(right.d()), matrix))
}

/// Kronecker product tuned with an outer `(d+1)`-CFF
///
/// Column `(i, j)` stacks outer column `i`, outer column `j` and the product of
/// bottom column `i` with inner column `j`. Any cover by `d + 1` columns must
/// reuse both `i` and `j` among them, which leaves at most `d` columns to cover
/// the product block.
pub(super) fn optimized_kronecker(outer: &Cff, inner: &Cff, bottom: &Cff) -> EngineResult {
    const NAME: &str = "optimized_kronecker";
    if bottom.d() != inner.d() || outer.d() != bottom.d() + 1 {
        return Err(ConstructionError::unsupported(
            NAME,
            format!("incompatible d: outer {outer}, inner {inner}, bottom {bottom}"),
        ));
    }

    let to = outer.t();
    let (ti, tb) = (inner.t(), bottom.t());
    let n1 = outer.n().min(bottom.n());
    let n2 = outer.n().min(inner.n());
    let rows = grow(NAME, scale(NAME, to, 2)?, scale(NAME, tb, ti)?)?;
    let mut matrix = allocate(NAME, rows, scale(NAME, n1, n2)?)?;

    let (om, im, bm) = (outer.matrix(), inner.matrix(), bottom.matrix());
    for i in 0..n1 {
        for j in 0..n2 {
            let col = i * n2 + j;
            blit_column(&mut matrix, om, i, 0, col);
            blit_column(&mut matrix, om, j, to, col);
            for b in (0..tb).filter(|&b| bm.bit(b, i)) {
                for r in (0..ti).filter(|&r| im.bit(r, j)) {
                    matrix.set_bit(2 * to + b * ti + r, col, true);
                }
            }
        }
    }
    Ok(EngineOutput::new(outer.d(), matrix))
}
