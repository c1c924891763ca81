//! Finite fields `GF(p^e)` with table-driven arithmetic
//!
//! Elements are the integers `0..q`; element `a` stands for the polynomial
//! whose coefficients are the base-`p` digits of `a`, low degree first.
//! Prime fields use plain modular arithmetic through the same tables.

use cfftables_core::prime_power;

/// Largest field order the tables are built for
pub const MAX_FIELD_ORDER: usize = 256;

/// A finite field of prime power order
#[derive(Debug, Clone)]
pub struct Field {
    order: usize,
    add: Vec<u16>,
    mul: Vec<u16>,
}

impl Field {
    /// Build `GF(q)`; `None` if `q` is not a prime power or exceeds [`MAX_FIELD_ORDER`]
    pub fn new(q: usize) -> Option<Self> {
        if q > MAX_FIELD_ORDER {
            return None;
        }
        let (p, e) = prime_power(q)?;
        let modulus = irreducible(p, e as usize)?;

        let mut add = vec![0u16; q * q];
        let mut mul = vec![0u16; q * q];
        for a in 0..q {
            let pa = digits(a, p, e as usize);
            for b in 0..q {
                let pb = digits(b, p, e as usize);
                let sum: Vec<usize> = pa.iter().zip(&pb).map(|(x, y)| (x + y) % p).collect();
                add[a * q + b] = undigits(&sum, p) as u16;
                mul[a * q + b] = undigits(&poly_mul_mod(&pa, &pb, &modulus, p), p) as u16;
            }
        }

        Some(Self {
            order: q,
            add,
            mul,
        })
    }

    /// Number of elements
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn add(&self, a: usize, b: usize) -> usize {
        self.add[a * self.order + b] as usize
    }

    #[inline]
    pub fn mul(&self, a: usize, b: usize) -> usize {
        self.mul[a * self.order + b] as usize
    }

    /// Evaluate `coeffs[0] + coeffs[1] x + ...` at `x` (Horner)
    pub fn eval(&self, coeffs: &[usize], x: usize) -> usize {
        coeffs
            .iter()
            .rev()
            .fold(0, |acc, &c| self.add(self.mul(acc, x), c))
    }

    /// Inner product of two vectors of field elements
    pub fn dot(&self, a: &[usize], b: &[usize]) -> usize {
        a.iter()
            .zip(b)
            .fold(0, |acc, (&x, &y)| self.add(acc, self.mul(x, y)))
    }

    /// Write the base-`q` digits of `index` into `out`, least significant first
    pub fn vector(&self, mut index: usize, out: &mut [usize]) {
        for slot in out.iter_mut() {
            *slot = index % self.order;
            index /= self.order;
        }
    }
}

fn digits(mut a: usize, p: usize, e: usize) -> Vec<usize> {
    let mut out = vec![0; e];
    for slot in out.iter_mut() {
        *slot = a % p;
        a /= p;
    }
    out
}

fn undigits(poly: &[usize], p: usize) -> usize {
    poly.iter().rev().fold(0, |acc, &c| acc * p + c)
}

/// Remainder of `a` modulo the monic polynomial `m`, coefficients mod `p`
fn poly_rem(a: &[usize], m: &[usize], p: usize) -> Vec<usize> {
    let deg_m = m.len() - 1;
    let mut r = a.to_vec();
    while r.len() > deg_m {
        let lead = r[r.len() - 1];
        let shift = r.len() - 1 - deg_m;
        if lead != 0 {
            for (i, &c) in m.iter().enumerate() {
                r[shift + i] = (r[shift + i] + p * p - lead * c % p) % p;
            }
        }
        r.pop();
    }
    r
}

fn poly_mul_mod(a: &[usize], b: &[usize], m: &[usize], p: usize) -> Vec<usize> {
    let mut prod = vec![0; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            prod[i + j] = (prod[i + j] + x * y) % p;
        }
    }
    let mut r = poly_rem(&prod, m, p);
    r.resize(m.len() - 1, 0);
    r
}

/// Monic polynomial with `degree + 1` coefficients built from `tail` digits
fn monic(tail: usize, p: usize, degree: usize) -> Vec<usize> {
    let mut poly = digits(tail, p, degree);
    poly.push(1);
    poly
}

/// First monic irreducible polynomial of the given degree over `GF(p)`
fn irreducible(p: usize, degree: usize) -> Option<Vec<usize>> {
    if degree == 1 {
        return Some(vec![0, 1]);
    }
    let count = p.pow(degree as u32);
    (0..count)
        .map(|tail| monic(tail, p, degree))
        .find(|f| {
            (1..=degree / 2).all(|k| {
                (0..p.pow(k as u32)).all(|g| poly_rem(f, &monic(g, p, k), p).iter().any(|&c| c != 0))
            })
        })
}
