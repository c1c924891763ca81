//! Construction requests and the provider interface that fulfils them
//!
//! A [`Construction`] names one of the direct or recursive constructions
//! together with its parameters. Any [`ConstructionProvider`] can turn a request
//! into an [`EngineOutput`]; [`StandardEngine`] is the built-in provider.
//!
//! Preconditions that belong to the request itself (Steiner triple system
//! orders, the doubling input being a 2-CFF, the `d` relation between the
//! three inputs of the optimized Kronecker product) are checked by the
//! request builders and reported as invalid arguments. Everything a provider
//! rejects is a [`ConstructionError`].

mod direct;
pub mod field;
mod recursive;

use cfftables_core::{doubling_aux_size, BitMatrix, CoreError};
use thiserror::Error;

use crate::cff::Cff;
use crate::error::{Error, Result};

/// Upper bound on the number of cells an engine will allocate
pub const MAX_ENGINE_CELLS: usize = 1 << 30;

/// A construction request
#[derive(Debug, Clone, Copy)]
pub enum Construction<'a> {
    /// `d-CFF(t, n)` with every cell clear
    AllZeros { d: usize, t: usize, n: usize },
    /// The `n x n` identity as a `d-CFF(n, n)`
    Identity { d: usize, n: usize },
    /// Middle layer of the subset lattice, a `1-CFF(s, n)`
    Sperner { n: usize },
    /// The first `n` triples of a Steiner triple system of order `v`, a
    /// `2-CFF(v, n)` with `n <= v(v-1)/6`
    Sts { v: usize, n: usize },
    /// Reed-Solomon code over `GF(q)` with messages of length `k`
    ReedSolomon { q: usize, k: usize },
    /// Reed-Solomon code evaluated at only `m` points
    ShortReedSolomon { q: usize, k: usize, m: usize },
    /// Greedy derandomized linear code of length `m`, dimension `k` over `GF(q)`
    PoratRothschild { q: usize, k: usize, m: usize },
    /// One new row and one new column
    ExtendByOne { base: &'a Cff },
    /// Block diagonal sum
    Add { left: &'a Cff, right: &'a Cff },
    /// Doubling of a 2-CFF using an auxiliary Sperner system on `aux_size` points
    Double { base: &'a Cff, aux_size: usize },
    /// Kronecker product
    Kronecker { left: &'a Cff, right: &'a Cff },
    /// Kronecker product with an outer `(d+1)`-CFF and two `d`-CFFs
    OptimizedKronecker {
        outer: &'a Cff,
        inner: &'a Cff,
        bottom: &'a Cff,
    },
}

impl<'a> Construction<'a> {
    /// Steiner triple system request; `v` must be 1 or 3 mod 6
    pub fn sts(v: usize) -> Result<Self> {
        Self::sts_columns(v, v * v.saturating_sub(1) / 6)
    }

    /// Steiner triple system request keeping only the first `n` triples
    pub fn sts_columns(v: usize, n: usize) -> Result<Self> {
        if v % 6 != 1 && v % 6 != 3 {
            return Err(Error::invalid(format!(
                "no Steiner triple system of order {v} (order must be 1 or 3 mod 6)"
            )));
        }
        let blocks = v * (v - 1) / 6;
        if n > blocks {
            return Err(Error::invalid(format!(
                "STS({v}) has {blocks} triples, {n} requested"
            )));
        }
        Ok(Construction::Sts { v, n })
    }

    /// Doubling request; `base` must be a 2-CFF
    ///
    /// The auxiliary size is the smallest `s` with `C(s, ⌊s/2⌋) > n`.
    pub fn double(base: &'a Cff) -> Result<Self> {
        if base.d() != 2 {
            return Err(Error::invalid(format!(
                "doubling needs a 2-CFF, got {base}"
            )));
        }
        Ok(Construction::Double {
            base,
            aux_size: doubling_aux_size(base.n()),
        })
    }

    /// Optimized Kronecker request
    ///
    /// Requires `bottom.d == inner.d` and `outer.d == bottom.d + 1`.
    pub fn optimized_kronecker(outer: &'a Cff, inner: &'a Cff, bottom: &'a Cff) -> Result<Self> {
        if bottom.d() != inner.d() {
            return Err(Error::invalid(format!(
                "bottom {bottom} and inner {inner} must share d"
            )));
        }
        if outer.d() != bottom.d() + 1 {
            return Err(Error::invalid(format!(
                "outer {outer} must have d = {}",
                bottom.d() + 1
            )));
        }
        Ok(Construction::OptimizedKronecker {
            outer,
            inner,
            bottom,
        })
    }

    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Construction::AllZeros { .. } => "all_zeros",
            Construction::Identity { .. } => "identity",
            Construction::Sperner { .. } => "sperner",
            Construction::Sts { .. } => "sts",
            Construction::ReedSolomon { .. } => "reed_solomon",
            Construction::ShortReedSolomon { .. } => "short_reed_solomon",
            Construction::PoratRothschild { .. } => "porat_rothschild",
            Construction::ExtendByOne { .. } => "extend_by_one",
            Construction::Add { .. } => "add",
            Construction::Double { .. } => "double",
            Construction::Kronecker { .. } => "kronecker",
            Construction::OptimizedKronecker { .. } => "optimized_kronecker",
        }
    }
}

/// Matrix and cover-free parameter produced by a provider
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// Cover-free parameter the matrix is guaranteed to satisfy
    pub d: usize,
    /// The incidence matrix
    pub matrix: BitMatrix,
}

impl EngineOutput {
    pub fn new(d: usize, matrix: BitMatrix) -> Self {
        Self { d, matrix }
    }
}

/// Reasons a provider could not produce a matrix
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Parameters the construction cannot work with
    #[error("{construction}: {reason}")]
    Unsupported {
        construction: &'static str,
        reason: String,
    },

    /// The result would exceed the engine's allocation limit
    #[error("{0}: result too large to allocate")]
    TooLarge(&'static str),

    /// The construction ran but its result is not cover-free for any d >= 1
    #[error("{0}: construction degenerated")]
    Degenerate(&'static str),

    /// Matrix storage could not be set up
    #[error("{construction}: {cause}")]
    Storage {
        construction: &'static str,
        cause: CoreError,
    },
}

impl ConstructionError {
    pub(crate) fn unsupported(construction: &'static str, reason: impl Into<String>) -> Self {
        ConstructionError::Unsupported {
            construction,
            reason: reason.into(),
        }
    }
}

/// Something that turns construction requests into matrices
pub trait ConstructionProvider {
    /// Build the requested matrix
    fn construct(&self, request: &Construction<'_>) -> std::result::Result<EngineOutput, ConstructionError>;
}

impl<P: ConstructionProvider + ?Sized> ConstructionProvider for &P {
    fn construct(&self, request: &Construction<'_>) -> std::result::Result<EngineOutput, ConstructionError> {
        (**self).construct(request)
    }
}

/// Built-in provider implementing every [`Construction`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEngine;

impl ConstructionProvider for StandardEngine {
    fn construct(&self, request: &Construction<'_>) -> std::result::Result<EngineOutput, ConstructionError> {
        log::debug!("constructing {}", request.name());
        match *request {
            Construction::AllZeros { d, t, n } => direct::all_zeros(d, t, n),
            Construction::Identity { d, n } => direct::identity(d, n),
            Construction::Sperner { n } => direct::sperner(n),
            Construction::Sts { v, n } => direct::sts(v, n),
            Construction::ReedSolomon { q, k } => {
                direct::short_reed_solomon("reed_solomon", q, k, q)
            }
            Construction::ShortReedSolomon { q, k, m } => {
                direct::short_reed_solomon("short_reed_solomon", q, k, m)
            }
            Construction::PoratRothschild { q, k, m } => direct::porat_rothschild(q, k, m),
            Construction::ExtendByOne { base } => recursive::extend_by_one(base),
            Construction::Add { left, right } => recursive::add(left, right),
            Construction::Double { base, aux_size } => recursive::double(base, aux_size),
            Construction::Kronecker { left, right } => recursive::kronecker(left, right),
            Construction::OptimizedKronecker {
                outer,
                inner,
                bottom,
            } => recursive::optimized_kronecker(outer, inner, bottom),
        }
    }
}

/// Allocate an empty matrix, enforcing the engine cell limit
pub(crate) fn allocate(
    construction: &'static str,
    rows: usize,
    cols: usize,
) -> std::result::Result<BitMatrix, ConstructionError> {
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_ENGINE_CELLS => {}
        _ => return Err(ConstructionError::TooLarge(construction)),
    }
    BitMatrix::new(rows, cols).map_err(|cause| ConstructionError::Storage {
        construction,
        cause,
    })
}
