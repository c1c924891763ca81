//! Counting helpers shared by constructions, verification and the catalog
//!
//! Binomials saturate at `usize::MAX` instead of overflowing, which is all the
//! catalog needs when comparing column counts against its bounds.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// `C(n, k)`, saturating at `usize::MAX`
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc == C(n, i) here, and C(n, i) * (n - i) is divisible by i + 1
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return usize::MAX,
        };
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

/// Size of the largest antichain on `s` points, `C(s, ⌊s/2⌋)`
pub fn middle_binomial(s: usize) -> usize {
    binomial(s, s / 2)
}

/// Smallest ground set `s >= 2` whose middle layer has at least `n` subsets
pub fn sperner_ground_size(n: usize) -> usize {
    let mut s = 2;
    while middle_binomial(s) < n {
        s += 1;
    }
    s
}

/// Smallest `s >= 1` with `C(s, ⌊s/2⌋) > n`, the auxiliary size of the doubling
/// construction
pub fn doubling_aux_size(n: usize) -> usize {
    let mut s = 1;
    while middle_binomial(s) <= n {
        s += 1;
    }
    s
}

/// `base^exp`, or `None` on overflow
pub fn checked_pow(base: usize, exp: usize) -> Option<usize> {
    let exp = u32::try_from(exp).ok()?;
    base.checked_pow(exp)
}

/// Decompose `q` as `p^e` with `p` prime, if it is a prime power
pub fn prime_power(q: usize) -> Option<(usize, u32)> {
    if q < 2 {
        return None;
    }
    let mut p = 2;
    while p * p <= q && q % p != 0 {
        p += 1;
    }
    if q % p != 0 {
        // no factor up to sqrt(q): q is prime
        return Some((q, 1));
    }
    let mut rest = q;
    let mut e = 0;
    while rest % p == 0 {
        rest /= p;
        e += 1;
    }
    (rest == 1).then_some((p, e))
}

/// Lexicographic `k`-combinations of `0..n`
///
/// `next_combination` lends the current combination without allocating;
/// the `Iterator` impl clones it into a `Vec`.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

#[cfg(feature = "alloc")]
impl Combinations {
    /// Combinations of `k` elements out of `n`; empty if `k > n`
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    /// Advance and return the next combination in ascending order
    pub fn next_combination(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

#[cfg(feature = "alloc")]
impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_combination().map(|c| c.to_vec())
    }
}
