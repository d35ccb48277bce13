// src/factor/mod.rs

//! Number-theoretic reduction from an even period to a factor pair.

use crate::arithmetic::{gcd, power_mod};
use std::fmt;
use tracing::debug;

/// Two integers whose product is exactly N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactorPair {
    first: u64,
    second: u64,
}

impl FactorPair {
    /// Pairs `first` and `second` if their product is `n` (overflow-checked).
    pub fn verified(first: u64, second: u64, n: u64) -> Option<Self> {
        match first.checked_mul(second) {
            Some(product) if product == n => Some(Self { first, second }),
            _ => None,
        }
    }

    /// Pairs a divisor `d` of `n` with its cofactor `n / d`.
    ///
    /// # Panics
    /// Panics if `d` is zero.
    pub fn from_divisor(d: u64, n: u64) -> Self {
        debug_assert!(n % d == 0, "{} does not divide {}", d, n);
        Self { first: d, second: n / d }
    }

    pub fn first(&self) -> u64 {
        self.first
    }

    pub fn second(&self) -> u64 {
        self.second
    }

    /// The factored integer N.
    pub fn product(&self) -> u64 {
        self.first * self.second
    }

    /// `true` for the useless split `(1, N)` / `(N, 1)`.
    pub fn is_trivial(&self) -> bool {
        self.first == 1 || self.second == 1
    }

    pub fn into_tuple(self) -> (u64, u64) {
        (self.first, self.second)
    }
}

impl fmt::Display for FactorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} × {}", self.product(), self.first, self.second)
    }
}

/// Splits `n` using an even period `r` of `a`:
/// `gcd(a^(r/2) - 1, n)` and `gcd(a^(r/2) + 1, n)`.
///
/// Returns `None` for an odd `r`, or when the two gcds do not multiply back
/// to `n`, which happens when they share a factor (even or non-squarefree N).
/// A returned pair may still be trivial, e.g. when `a^(r/2) ≡ -1 (mod n)`.
pub fn reduce_to_factors(a: u64, r: u64, n: u64) -> Option<FactorPair> {
    if r % 2 != 0 || n < 2 {
        debug!(r, n, "reduction needs an even period");
        return None;
    }

    let half = power_mod(a, r / 2, n);
    // Work modulo n: gcd(k, n) == gcd(k mod n, n), and x - 1 for x = 0 behaves as -1.
    let minus = if half == 0 { n - 1 } else { half - 1 };
    let plus = (half + 1) % n;
    let f1 = gcd(minus, n);
    let f2 = gcd(plus, n);

    let pair = FactorPair::verified(f1, f2, n);
    if pair.is_none() {
        debug!(a, r, n, f1, f2, "gcd split does not multiply back to N");
    }
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_with_seven() {
        // 7^2 = 49 = 4 mod 15; gcd(3, 15) = 3, gcd(5, 15) = 5
        let pair = reduce_to_factors(7, 4, 15);
        assert_eq!(pair.map(FactorPair::into_tuple), Some((3, 5)));
        assert!(!pair.is_some_and(|p| p.is_trivial()));
    }

    #[test]
    fn fifteen_with_four() {
        // 4^1 = 4; gcd(3, 15) = 3, gcd(5, 15) = 5
        assert_eq!(reduce_to_factors(4, 2, 15).map(FactorPair::into_tuple), Some((3, 5)));
    }

    #[test]
    fn multiple_of_order_gives_trivial_split() {
        // 4^4 = 256 = 1 mod 15; gcd(0, 15) = 15, gcd(2, 15) = 1
        let pair = reduce_to_factors(4, 8, 15);
        assert_eq!(pair.map(FactorPair::into_tuple), Some((15, 1)));
        assert!(pair.is_some_and(|p| p.is_trivial()));
    }

    #[test]
    fn nine_and_twenty_one_with_two() {
        // 2^3 = 8 mod 9: gcd(7, 9) = 1, gcd(9, 9) = 9
        assert_eq!(reduce_to_factors(2, 6, 9).map(FactorPair::into_tuple), Some((1, 9)));
        // 2^3 = 8 mod 21: gcd(7, 21) = 7, gcd(9, 21) = 3
        assert_eq!(reduce_to_factors(2, 6, 21).map(FactorPair::into_tuple), Some((7, 3)));
    }

    #[test]
    fn odd_period_is_rejected() {
        assert_eq!(reduce_to_factors(7, 3, 15), None);
        assert_eq!(reduce_to_factors(1, 1, 15), None);
    }

    #[test]
    fn larger_moduli_split() {
        // 2^6 = 64 = 29 mod 35: gcd(28, 35) = 7, gcd(30, 35) = 5
        assert_eq!(reduce_to_factors(2, 12, 35).map(FactorPair::into_tuple), Some((7, 5)));
        // 2^6 = 64 = 19 mod 45: gcd(18, 45) = 9, gcd(20, 45) = 5
        assert_eq!(reduce_to_factors(2, 12, 45).map(FactorPair::into_tuple), Some((9, 5)));
        // 10^3 = 1000 = 55 mod 63: gcd(54, 63) = 9, gcd(56, 63) = 7
        assert_eq!(reduce_to_factors(10, 6, 63).map(FactorPair::into_tuple), Some((9, 7)));
    }

    #[test]
    fn half_power_of_minus_one_is_trivial() {
        // 14 = -1 mod 15: gcd(13, 15) = 1, gcd(0, 15) = 15
        assert_eq!(reduce_to_factors(14, 2, 15).map(FactorPair::into_tuple), Some((1, 15)));
    }

    #[test]
    fn unverifiable_split_is_rejected() {
        // 49^2 = 2401 = 1 mod 100, but gcd(48, 100) * gcd(50, 100) = 4 * 50 = 200
        assert_eq!(reduce_to_factors(49, 2, 100), None);
    }

    #[test]
    fn verified_pair_checks_product_and_overflow() {
        assert!(FactorPair::verified(3, 5, 15).is_some());
        assert!(FactorPair::verified(3, 5, 16).is_none());
        assert!(FactorPair::verified(u64::MAX, 2, 0).is_none());
        let pair = FactorPair::verified(3, 5, 15);
        assert_eq!(pair.map(|p| p.to_string()), Some("15 = 3 × 5".to_string()));
    }

    #[test]
    fn divisor_pairs_with_cofactor() {
        assert_eq!(FactorPair::from_divisor(3, 15).into_tuple(), (3, 5));
        assert_eq!(FactorPair::from_divisor(2, 8).into_tuple(), (2, 4));
        assert_eq!(FactorPair::from_divisor(7, 7).into_tuple(), (7, 1));
    }
}
