//! Catalog of best known CFFs
//!
//! [`CffTable`] plans a column count and recipe for every `(d, t)` within its
//! bounds when it is created, and builds the matrix for an entry only when
//! it is asked for. Every returned [`Cff`] is freshly built and owned by the
//! caller.

mod planner;

pub use planner::{PlanEntry, PlannerConfig, Recipe};

use log::{debug, info};

use crate::cff::Cff;
use crate::construct::{Construction, ConstructionProvider, StandardEngine};
use crate::error::{Error, Result};
use planner::Plan;

/// One row of the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub d: usize,
    pub t: usize,
    pub n: usize,
    pub recipe: Recipe,
}

/// Bounded catalog of CFFs indexed by `(d, t)` and `(d, n)`
#[derive(Debug, Clone)]
pub struct CffTable<P = StandardEngine> {
    d_max: usize,
    t_max: usize,
    n_max: usize,
    plan: Plan,
    provider: P,
}

impl CffTable<StandardEngine> {
    /// Catalog for `1 <= d <= d_max`, `1 <= t <= t_max`, with column counts
    /// capped at `n_max`
    pub fn new(d_max: usize, t_max: usize, n_max: usize) -> Result<Self> {
        Self::with_provider(StandardEngine, d_max, t_max, n_max)
    }

    pub fn with_config(
        d_max: usize,
        t_max: usize,
        n_max: usize,
        config: PlannerConfig,
    ) -> Result<Self> {
        Self::with_provider_and_config(StandardEngine, d_max, t_max, n_max, config)
    }
}

impl<P: ConstructionProvider> CffTable<P> {
    /// Catalog whose matrices are built by `provider`
    pub fn with_provider(provider: P, d_max: usize, t_max: usize, n_max: usize) -> Result<Self> {
        Self::with_provider_and_config(provider, d_max, t_max, n_max, PlannerConfig::default())
    }

    pub fn with_provider_and_config(
        provider: P,
        d_max: usize,
        t_max: usize,
        n_max: usize,
        config: PlannerConfig,
    ) -> Result<Self> {
        if d_max == 0 || t_max == 0 || n_max == 0 {
            return Err(Error::invalid(format!(
                "catalog bounds must be positive, got d_max={d_max} t_max={t_max} n_max={n_max}"
            )));
        }
        let plan = Plan::build(d_max, t_max, n_max, config);
        info!("planned CFF catalog for d <= {d_max}, t <= {t_max}, n <= {n_max}");
        Ok(Self {
            d_max,
            t_max,
            n_max,
            plan,
            provider,
        })
    }

    pub fn d_max(&self) -> usize {
        self.d_max
    }

    pub fn t_max(&self) -> usize {
        self.t_max
    }

    pub fn n_max(&self) -> usize {
        self.n_max
    }

    /// The engine matrices are built with
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The CFF with the most known columns for exactly `t` rows
    pub fn get_by_t(&self, d: usize, t: usize) -> Result<Cff> {
        self.check_d(d)?;
        if t == 0 || t > self.t_max {
            return Err(Error::invalid(format!("t must be in 1..={}, got {t}", self.t_max)));
        }
        let n = self
            .plan
            .best_n(d, t)
            .ok_or_else(|| Error::NotFound(format!("no CFF cataloged for d={d}, t={t}")))?;
        self.materialize(d, t, n)
    }

    /// The CFF with the fewest rows that has at least `n` columns
    ///
    /// With `exact_n` the result is reduced to exactly `n` columns; otherwise
    /// it keeps every column of the cataloged entry.
    pub fn get_by_n(&self, d: usize, n: usize, exact_n: bool) -> Result<Cff> {
        self.check_d(d)?;
        if n == 0 || n > self.n_max {
            return Err(Error::invalid(format!("n must be in 1..={}, got {n}", self.n_max)));
        }
        let t = self.plan.min_t(d, n).ok_or_else(|| {
            Error::NotFound(format!("no cataloged {d}-CFF with {n} columns in {} rows", self.t_max))
        })?;
        let want = if exact_n {
            n
        } else {
            self.plan.best_n(d, t).unwrap_or(n)
        };
        self.materialize(d, t, want)
    }

    /// Best known column count for `(d, t)`, if within bounds
    pub fn best_n(&self, d: usize, t: usize) -> Option<usize> {
        self.plan.best_n(d, t)
    }

    /// Fewest rows reaching `n` columns at `d`, if any
    pub fn min_t(&self, d: usize, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        self.plan.min_t(d, n)
    }

    /// Every planned entry, ordered by `d` then `t`
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.plan
            .iter()
            .map(|(d, t, e)| CatalogEntry {
                d,
                t,
                n: e.n,
                recipe: e.recipe,
            })
            .collect()
    }

    /// The listing of [`entries`](Self::entries) as JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries()).map_err(|e| Error::Parse(e.to_string()))
    }

    fn check_d(&self, d: usize) -> Result<()> {
        if d == 0 || d > self.d_max {
            return Err(Error::invalid(format!("d must be in 1..={}, got {d}", self.d_max)));
        }
        Ok(())
    }

    fn construct(&self, request: Construction<'_>) -> Result<Cff> {
        Cff::construct_with(&self.provider, &request)
    }

    /// Build entry `(d, t)` with at most `want` columns
    ///
    /// Sub-entries are built with the smallest column count that still lets
    /// the recipe reach `want`. The result is padded with zero rows to exactly
    /// `t`, trimmed to `want` columns and labelled with `d`.
    fn materialize(&self, d: usize, t: usize, want: usize) -> Result<Cff> {
        let entry = *self
            .plan
            .entry(d, t)
            .ok_or_else(|| Error::NotFound(format!("no CFF cataloged for d={d}, t={t}")))?;
        let want = want.clamp(1, entry.n.max(1));
        debug!("materializing d={d} t={t} n={want} via {:?}", entry.recipe);

        let mut cff = match entry.recipe {
            Recipe::Identity => self.construct(Construction::Identity { d, n: want })?,
            Recipe::Sperner => self.construct(Construction::Sperner { n: want })?,
            Recipe::Sts => self.construct(Construction::sts_columns(t, want)?)?,
            Recipe::ReedSolomon { q, k } => self.construct(Construction::ReedSolomon { q, k })?,
            Recipe::ShortReedSolomon { q, k, m } => {
                self.construct(Construction::ShortReedSolomon { q, k, m })?
            }
            Recipe::Stronger => self.materialize(d + 1, t, want)?,
            Recipe::ExtendByOne => {
                let base = self.materialize(d, t - 1, want.saturating_sub(1))?;
                self.construct(Construction::ExtendByOne { base: &base })?
            }
            Recipe::Add { left_t } => {
                let left = self.materialize(d, left_t, want)?;
                let right = self.materialize(d, t - left_t, want.saturating_sub(left.n()))?;
                self.construct(Construction::Add {
                    left: &left,
                    right: &right,
                })?
            }
            Recipe::Kronecker { left_t } => {
                let left = self.materialize(d, left_t, want)?;
                let right = self.materialize(d, t / left_t, want.div_ceil(left.n()))?;
                self.construct(Construction::Kronecker {
                    left: &left,
                    right: &right,
                })?
            }
            Recipe::Double { base_t } => {
                let base = self.materialize(2, base_t, want.div_ceil(2))?;
                self.construct(Construction::double(&base)?)?
            }
        };

        if cff.t() < t {
            cff = cff.padded_rows(t)?;
        }
        if cff.t() != t || cff.n() < want {
            return Err(Error::Allocation(format!(
                "{} built for d={d} t={t} n={want}",
                cff
            )));
        }
        cff.reduce(want)?;
        cff.set_d(d)?;
        Ok(cff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bounds_must_be_positive() {
        assert_eq!(CffTable::new(0, 10, 10).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(CffTable::new(1, 0, 10).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(CffTable::new(1, 10, 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_get_by_t_shape() {
        let table = CffTable::new(2, 16, 200).unwrap();
        for t in 1..=16 {
            let cff = table.get_by_t(2, t).unwrap();
            assert_eq!(cff.t(), t);
            assert_eq!(cff.d(), 2);
            assert_eq!(Some(cff.n()), table.best_n(2, t));
            assert!(cff.verify(), "{cff}");
        }
    }

    #[test]
    fn test_range_errors() {
        let table = CffTable::new(2, 10, 50).unwrap();
        assert_eq!(table.get_by_t(3, 5).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(table.get_by_t(1, 11).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(table.get_by_t(0, 1).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(table.get_by_n(1, 0, true).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(table.get_by_n(1, 51, true).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_get_by_n_not_found() {
        // ten rows hold at most C(10, 5) = 252 columns at d = 1
        let table = CffTable::new(1, 10, 1000).unwrap();
        assert_eq!(table.get_by_n(1, 999, true).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_get_by_n_exact_and_full() {
        let table = CffTable::new(2, 20, 100).unwrap();
        let exact = table.get_by_n(2, 10, true).unwrap();
        assert_eq!(exact.n(), 10);
        assert_eq!(Some(exact.t()), table.min_t(2, 10));
        assert!(exact.verify());

        let full = table.get_by_n(2, 10, false).unwrap();
        assert_eq!(full.t(), exact.t());
        assert!(full.n() >= 10);
        assert_eq!(Some(full.n()), table.best_n(2, full.t()));
    }

    #[test]
    fn test_entries_listing() {
        let table = CffTable::new(2, 5, 20).unwrap();
        let entries = table.entries();
        assert_eq!(entries.len(), 10);
        assert_eq!((entries[0].d, entries[0].t), (1, 1));
        assert_eq!((entries[9].d, entries[9].t), (2, 5));
        assert!(entries.iter().all(|e| e.n <= 20));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_to_json() {
        let table = CffTable::new(1, 4, 10).unwrap();
        let json = table.to_json().unwrap();
        let parsed: Vec<CatalogEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table.entries());
        assert!(json.contains("\"kind\": \"sperner\""));
    }
}
