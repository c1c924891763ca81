//! Direct constructions: identity, Sperner systems, Steiner triple systems and
//! the two code-based families over finite fields

use cfftables_core::combinatorics::checked_pow;
use cfftables_core::{sperner_ground_size, BitMatrix, Combinations};

use super::field::Field;
use super::{allocate, ConstructionError, EngineOutput};

type EngineResult = std::result::Result<EngineOutput, ConstructionError>;

/// Largest message space the greedy code search will enumerate
pub const MAX_GREEDY_MESSAGES: usize = 1024;

/// Longest code the greedy search will build
pub const MAX_GREEDY_LENGTH: usize = 64;

fn check_d(construction: &'static str, d: usize) -> std::result::Result<(), ConstructionError> {
    if d == 0 {
        return Err(ConstructionError::unsupported(construction, "d must be at least 1"));
    }
    Ok(())
}

pub(super) fn all_zeros(d: usize, t: usize, n: usize) -> EngineResult {
    check_d("all_zeros", d)?;
    Ok(EngineOutput::new(d, allocate("all_zeros", t, n)?))
}

pub(super) fn identity(d: usize, n: usize) -> EngineResult {
    check_d("identity", d)?;
    let mut matrix = allocate("identity", n, n)?;
    for i in 0..n {
        matrix.set_bit(i, i, true);
    }
    Ok(EngineOutput::new(d, matrix))
}

/// First `n` middle-layer subsets of the smallest ground set that has enough
pub(super) fn sperner(n: usize) -> EngineResult {
    if n == 0 {
        return Err(ConstructionError::unsupported("sperner", "n must be at least 1"));
    }
    let s = sperner_ground_size(n);
    let mut matrix = allocate("sperner", s, n)?;
    let mut subsets = Combinations::new(s, s / 2);
    let mut col = 0;
    while col < n {
        let Some(subset) = subsets.next_combination() else {
            break;
        };
        for &row in subset {
            matrix.set_bit(row, col, true);
        }
        col += 1;
    }
    Ok(EngineOutput::new(1, matrix))
}

/// Steiner triple system of order `v`; every pair of points lies in one triple
pub(super) fn sts(v: usize, n: usize) -> EngineResult {
    let mut triples = match v % 6 {
        3 => bose_triples(v),
        1 => skolem_triples(v),
        _ => {
            return Err(ConstructionError::unsupported(
                "sts",
                format!("no Steiner triple system of order {v}"),
            ))
        }
    };
    debug_assert_eq!(triples.len(), v * (v - 1) / 6);
    if n > triples.len() {
        return Err(ConstructionError::unsupported(
            "sts",
            format!("STS({v}) has only {} triples", triples.len()),
        ));
    }
    triples.truncate(n);

    let mut matrix = allocate("sts", v, triples.len())?;
    for (col, triple) in triples.iter().enumerate() {
        for &row in triple {
            matrix.set_bit(row, col, true);
        }
    }
    Ok(EngineOutput::new(2, matrix))
}

/// Bose construction for `v = 6k + 3` over the idempotent commutative
/// quasigroup `x∘y = (x + y)(k + 1) mod (2k + 1)`
fn bose_triples(v: usize) -> Vec<[usize; 3]> {
    let order = v / 3;
    let half = (order + 1) / 2;
    let point = |x: usize, i: usize| (i % 3) * order + x;
    let op = |x: usize, y: usize| ((x + y) * half) % order;

    let mut triples = Vec::with_capacity(v * (v - 1) / 6);
    for x in 0..order {
        triples.push([point(x, 0), point(x, 1), point(x, 2)]);
    }
    for i in 0..3 {
        for x in 0..order {
            for y in x + 1..order {
                triples.push([point(x, i), point(y, i), point(op(x, y), i + 1)]);
            }
        }
    }
    triples
}

/// Skolem construction for `v = 6n + 1` over the half-idempotent commutative
/// quasigroup of order `2n`; the extra point is the last row
fn skolem_triples(v: usize) -> Vec<[usize; 3]> {
    let n = v / 6;
    let order = 2 * n;
    let infinity = v - 1;
    let point = |x: usize, i: usize| (i % 3) * order + x;
    let op = |x: usize, y: usize| {
        let s = (x + y) % order;
        if s % 2 == 0 {
            s / 2
        } else {
            n + (s - 1) / 2
        }
    };

    let mut triples = Vec::with_capacity(v * (v - 1) / 6);
    for x in 0..n {
        triples.push([point(x, 0), point(x, 1), point(x, 2)]);
    }
    for i in 0..3 {
        for x in 0..n {
            triples.push([infinity, point(x + n, i), point(x, i + 1)]);
        }
    }
    for i in 0..3 {
        for x in 0..order {
            for y in x + 1..order {
                triples.push([point(x, i), point(y, i), point(op(x, y), i + 1)]);
            }
        }
    }
    triples
}

/// Reed-Solomon code of dimension `k` evaluated at the first `m` field elements
///
/// Row `x * q + y` holds the columns whose polynomial takes value `y` at `x`.
pub(super) fn short_reed_solomon(name: &'static str, q: usize, k: usize, m: usize) -> EngineResult {
    if k < 2 || k > m || m > q {
        return Err(ConstructionError::unsupported(
            name,
            format!("need 2 <= k <= m <= q, got q={q} k={k} m={m}"),
        ));
    }
    let field = Field::new(q)
        .ok_or_else(|| ConstructionError::unsupported(name, format!("{q} is not a supported prime power")))?;
    let n = checked_pow(q, k).ok_or(ConstructionError::TooLarge(name))?;
    let mut matrix = allocate(name, m * q, n)?;

    let mut coeffs = vec![0; k];
    for col in 0..n {
        field.vector(col, &mut coeffs);
        for x in 0..m {
            matrix.set_bit(x * q + field.eval(&coeffs, x), col, true);
        }
    }
    Ok(EngineOutput::new((m - 1) / (k - 1), matrix))
}

/// Greedy derandomized linear code concatenated with the identity code
///
/// Each coordinate functional `a_j` is picked to minimise the pessimistic
/// estimator `sum_x q^(zeros_x)` over non-zero messages `x`, where `zeros_x`
/// counts the coordinates chosen so far at which the codeword of `x` vanishes.
pub(super) fn porat_rothschild(q: usize, k: usize, m: usize) -> EngineResult {
    const NAME: &str = "porat_rothschild";
    if k == 0 || m == 0 || m > MAX_GREEDY_LENGTH {
        return Err(ConstructionError::unsupported(
            NAME,
            format!("need k >= 1 and 1 <= m <= {MAX_GREEDY_LENGTH}, got k={k} m={m}"),
        ));
    }
    let field = Field::new(q)
        .ok_or_else(|| ConstructionError::unsupported(NAME, format!("{q} is not a supported prime power")))?;
    let n = match checked_pow(q, k) {
        Some(n) if n <= MAX_GREEDY_MESSAGES => n,
        _ => return Err(ConstructionError::TooLarge(NAME)),
    };

    let messages: Vec<Vec<usize>> = (0..n)
        .map(|idx| {
            let mut v = vec![0; k];
            field.vector(idx, &mut v);
            v
        })
        .collect();

    let weight = q as f64;
    let mut zeros = vec![0usize; n];
    let mut functionals = Vec::with_capacity(m);
    for _ in 0..m {
        let mut best: Option<(f64, usize)> = None;
        for cand in 1..n {
            let score: f64 = (1..n)
                .map(|x| {
                    let z = zeros[x] + usize::from(field.dot(&messages[cand], &messages[x]) == 0);
                    weight.powi(z as i32)
                })
                .sum();
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, cand));
            }
        }
        // n >= 2 since q >= 2 and k >= 1
        let Some((_, chosen)) = best else {
            return Err(ConstructionError::Degenerate(NAME));
        };
        for x in 1..n {
            if field.dot(&messages[chosen], &messages[x]) == 0 {
                zeros[x] += 1;
            }
        }
        functionals.push(chosen);
    }

    let max_zeros = zeros[1..].iter().copied().max().unwrap_or(0);
    if max_zeros >= m {
        return Err(ConstructionError::Degenerate(NAME));
    }
    let d = if max_zeros == 0 {
        (n - 1).max(1)
    } else {
        (m - 1) / max_zeros
    };

    let mut matrix: BitMatrix = allocate(NAME, m * q, n)?;
    for (j, &a) in functionals.iter().enumerate() {
        for (col, message) in messages.iter().enumerate() {
            matrix.set_bit(j * q + field.dot(&messages[a], message), col, true);
        }
    }
    Ok(EngineOutput::new(d, matrix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfftables_core::MatrixOperations;

    #[test]
    fn test_identity_and_zeros() {
        let out = identity(3, 5).unwrap();
        assert_eq!(out.d, 3);
        assert_eq!(out.matrix.col_support(4), Some(vec![4]));

        let out = all_zeros(1, 3, 7).unwrap();
        assert_eq!((out.matrix.rows(), out.matrix.cols()), (3, 7));
        assert!(all_zeros(0, 3, 7).is_err());
    }

    #[test]
    fn test_sperner_shape() {
        let out = sperner(6).unwrap();
        assert_eq!((out.matrix.rows(), out.matrix.cols()), (4, 6));
        assert_eq!(out.matrix.col_support(0), Some(vec![0, 1]));
        assert_eq!(out.matrix.col_support(5), Some(vec![2, 3]));
        assert!(sperner(0).is_err());
    }

    #[test]
    fn test_sts_pairs_covered_once() {
        for v in [3, 7, 9, 13, 15] {
            let out = sts(v, v * (v - 1) / 6).unwrap();
            assert_eq!(out.matrix.cols(), v * (v - 1) / 6);
            for a in 0..v {
                for b in a + 1..v {
                    let together = (0..out.matrix.cols())
                        .filter(|&c| out.matrix.bit(a, c) && out.matrix.bit(b, c))
                        .count();
                    assert_eq!(together, 1, "v={v} pair ({a},{b})");
                }
            }
        }
        assert!(sts(8, 0).is_err());
    }

    #[test]
    fn test_sts_keeps_leading_triples() {
        let full = sts(13, 26).unwrap();
        let part = sts(13, 5).unwrap();
        assert_eq!((part.matrix.rows(), part.matrix.cols()), (13, 5));
        for c in 0..5 {
            assert_eq!(part.matrix.col_support(c), full.matrix.col_support(c));
        }
        assert!(matches!(sts(13, 27), Err(ConstructionError::Unsupported { .. })));
    }

    #[test]
    fn test_reed_solomon_rows_partition_columns() {
        let out = short_reed_solomon("reed_solomon", 4, 2, 4).unwrap();
        assert_eq!(out.d, 3);
        assert_eq!((out.matrix.rows(), out.matrix.cols()), (16, 16));
        // every evaluation point puts each column in exactly one row of its block
        for col in 0..16 {
            assert_eq!(out.matrix.col_count_ones(col), 4);
        }

        let short = short_reed_solomon("short_reed_solomon", 5, 2, 3).unwrap();
        assert_eq!(short.d, 2);
        assert_eq!(short.matrix.rows(), 15);
        assert!(short_reed_solomon("short_reed_solomon", 6, 2, 3).is_err());
        assert!(short_reed_solomon("short_reed_solomon", 5, 4, 3).is_err());
    }

    #[test]
    fn test_porat_rothschild_distance() {
        let out = porat_rothschild(3, 2, 4).unwrap();
        assert_eq!((out.matrix.rows(), out.matrix.cols()), (12, 9));
        assert!(out.d >= 1);
        // two distinct codewords agree in at most (m - 1) / d positions
        for a in 0..9 {
            for b in a + 1..9 {
                let shared = (0..12)
                    .filter(|&r| out.matrix.bit(r, a) && out.matrix.bit(r, b))
                    .count();
                assert!(shared * out.d < 4);
            }
        }
        assert!(porat_rothschild(2, 11, 4).is_err());
    }
}
