//! Column-count planning for the catalog
//!
//! For every `(d, t)` the planner records the largest column count it can
//! reach with `t` rows and the recipe that reaches it. Planning is plain
//! arithmetic on column counts; no matrix is built here.

use cfftables_core::combinatorics::{checked_pow, middle_binomial};
use cfftables_core::{doubling_aux_size, prime_power};
use hashbrown::HashMap;

use crate::construct::field::MAX_FIELD_ORDER;

/// How a catalog entry is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Recipe {
    Identity,
    Sperner,
    Sts,
    ReedSolomon { q: usize, k: usize },
    ShortReedSolomon { q: usize, k: usize, m: usize },
    /// The `(d + 1, t)` entry
    Stronger,
    /// The `(2, base_t)` entry doubled
    Double { base_t: usize },
    /// `(d, left_t)` times `(d, t / left_t)`
    Kronecker { left_t: usize },
    /// `(d, left_t)` plus `(d, t - left_t)`
    Add { left_t: usize },
    /// The `(d, t - 1)` entry with one more row and column
    ExtendByOne,
}

/// Best known column count for one `(d, t)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    pub n: usize,
    pub recipe: Recipe,
}

/// Which recipe families the planner may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Consider Reed-Solomon and shortened Reed-Solomon codes
    pub reed_solomon: bool,
    /// Consider Kronecker products
    pub kronecker: bool,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the Reed-Solomon families
    pub fn with_reed_solomon(mut self, enabled: bool) -> Self {
        self.reed_solomon = enabled;
        self
    }

    /// Enable or disable Kronecker products
    pub fn with_kronecker(mut self, enabled: bool) -> Self {
        self.kronecker = enabled;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            reed_solomon: true,
            kronecker: true,
        }
    }
}

/// Planned entries for every `d` in `1..=d_max` and `t` in `1..=t_max`
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    entries: HashMap<(usize, usize), PlanEntry>,
    /// `columns[d - 1][t - 1]`, non-decreasing in `t`
    columns: Vec<Vec<usize>>,
}

impl Plan {
    pub(crate) fn build(d_max: usize, t_max: usize, n_max: usize, config: PlannerConfig) -> Self {
        let mut plan = Self {
            entries: HashMap::with_capacity(d_max * t_max),
            columns: vec![Vec::with_capacity(t_max); d_max],
        };
        // Larger d first so `Stronger` can look its entry up
        for d in (1..=d_max).rev() {
            for t in 1..=t_max {
                let entry = plan.best_candidate(d, t, d_max, n_max, config);
                plan.entries.insert((d, t), entry);
                plan.columns[d - 1].push(entry.n);
            }
        }
        plan
    }

    pub(crate) fn entry(&self, d: usize, t: usize) -> Option<&PlanEntry> {
        self.entries.get(&(d, t))
    }

    pub(crate) fn best_n(&self, d: usize, t: usize) -> Option<usize> {
        self.entry(d, t).map(|e| e.n)
    }

    /// Smallest `t` whose entry reaches `n` columns
    pub(crate) fn min_t(&self, d: usize, n: usize) -> Option<usize> {
        let columns = self.columns.get(d.checked_sub(1)?)?;
        let idx = columns.partition_point(|&c| c < n);
        (idx < columns.len()).then_some(idx + 1)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, usize, &PlanEntry)> + '_ {
        self.columns.iter().enumerate().flat_map(move |(di, cols)| {
            (1..=cols.len()).filter_map(move |t| self.entry(di + 1, t).map(|e| (di + 1, t, e)))
        })
    }

    fn n_at(&self, d: usize, t: usize) -> usize {
        self.best_n(d, t).unwrap_or(0)
    }

    /// The first candidate with the most columns wins
    fn best_candidate(
        &self,
        d: usize,
        t: usize,
        d_max: usize,
        n_max: usize,
        config: PlannerConfig,
    ) -> PlanEntry {
        let mut best = PlanEntry {
            n: t.min(n_max),
            recipe: Recipe::Identity,
        };
        let mut offer = |n: usize, recipe: Recipe| {
            let n = n.min(n_max);
            if n > best.n {
                best = PlanEntry { n, recipe };
            }
        };

        if d == 1 && t >= 2 {
            offer(middle_binomial(t), Recipe::Sperner);
        }
        if d <= 2 && matches!(t % 6, 1 | 3) {
            offer(t * (t - 1) / 6, Recipe::Sts);
        }
        if config.reed_solomon {
            if let Some((n, recipe)) = best_code(d, t, n_max) {
                offer(n, recipe);
            }
        }
        if d < d_max {
            offer(self.n_at(d + 1, t), Recipe::Stronger);
        }
        if d == 2 {
            for base_t in 1..t {
                let base_n = self.n_at(2, base_t);
                let aux = doubling_aux_size(base_n) | 1;
                if base_t + aux + 1 <= t {
                    offer(base_n.saturating_mul(2), Recipe::Double { base_t });
                }
            }
        }
        if config.kronecker {
            for left_t in (2..t).take_while(|&l| l * l <= t) {
                if t % left_t == 0 {
                    let n = self.n_at(d, left_t).saturating_mul(self.n_at(d, t / left_t));
                    offer(n, Recipe::Kronecker { left_t });
                }
            }
        }
        for left_t in 1..=t / 2 {
            let n = self.n_at(d, left_t).saturating_add(self.n_at(d, t - left_t));
            offer(n, Recipe::Add { left_t });
        }
        if t >= 2 {
            offer(self.n_at(d, t - 1).saturating_add(1), Recipe::ExtendByOne);
        }

        best
    }
}

/// Largest Reed-Solomon style code with exactly `t = m * q` rows that is a
/// `d`-CFF and has at most `n_max` columns
fn best_code(d: usize, t: usize, n_max: usize) -> Option<(usize, Recipe)> {
    let mut best: Option<(usize, Recipe)> = None;
    for q in (2..=MAX_FIELD_ORDER.min(t)).filter(|&q| t % q == 0) {
        let m = t / q;
        if m > q || prime_power(q).is_none() {
            continue;
        }
        for k in 2..=m {
            if (m - 1) / (k - 1) < d {
                break;
            }
            let Some(n) = checked_pow(q, k).filter(|&n| n <= n_max) else {
                break;
            };
            if best.map_or(true, |(b, _)| n > b) {
                let recipe = if m == q {
                    Recipe::ReedSolomon { q, k }
                } else {
                    Recipe::ShortReedSolomon { q, k, m }
                };
                best = Some((n, recipe));
            }
        }
    }
    best
}
