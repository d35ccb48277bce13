// src/arithmetic/mod.rs

//! Exact integer arithmetic used on both sides of the quantum subroutine:
//! the phase factors of the oracle model and the classical reduction.

use num_integer::Integer;

/// Computes `base^exponent mod modulus` by repeated squaring.
///
/// Intermediate products are widened to `u128`, so the result is exact for
/// every `u64` input. A modulus of 1 yields 0.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn power_mod(base: u64, exponent: u64, modulus: u64) -> u64 {
    assert!(modulus >= 1, "power_mod requires a modulus of at least 1");
    if modulus == 1 {
        return 0;
    }

    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut square = base as u128 % m;
    let mut exp = exponent;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * square % m;
        }
        exp >>= 1;
        square = square * square % m;
    }
    result as u64
}

/// Greatest common divisor; `gcd(x, 0) == x`.
pub fn gcd(x: u64, y: u64) -> u64 {
    x.gcd(&y)
}

/// Number of bits needed to hold every residue modulo `n`, i.e. `ceil(log2(n))`.
pub fn target_width(n: u64) -> usize {
    if n <= 1 {
        return 0;
    }
    (u64::BITS - (n - 1).leading_zeros()) as usize
}

/// Smallest `r` in `1..n` with `a^r ≡ 1 (mod n)`, found by plain search.
///
/// Returns `None` when no such `r` exists below `n` (a shares a factor with
/// `n`, or `n < 2`).
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    (1..n).find(|&r| power_mod(a, r, n) == 1)
}
