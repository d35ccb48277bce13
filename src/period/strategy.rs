// src/period/strategy.rs

//! Ways of turning a measured distribution into an ordered list of period guesses.

use crate::simulation::OutcomeDistribution;

/// Produces period candidates from a distribution, best guess first.
///
/// Candidates are only guesses; the extractor validates each one exactly.
pub trait CandidateStrategy {
    /// Ordered period guesses; may contain duplicates or useless values.
    fn guess_candidates(&self, distribution: &OutcomeDistribution) -> Vec<u64>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl<T: CandidateStrategy + ?Sized> CandidateStrategy for Box<T> {
    fn guess_candidates(&self, distribution: &OutcomeDistribution) -> Vec<u64> {
        (**self).guess_candidates(distribution)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Differences between adjacent observed values, after sorting ascending.
///
/// Peaks of a periodic phase are spaced by multiples of `2^width / r`, so the
/// gaps are a coarse proxy for the period and may well be false candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjacentDifferences;

impl CandidateStrategy for AdjacentDifferences {
    fn guess_candidates(&self, distribution: &OutcomeDistribution) -> Vec<u64> {
        let values = distribution.values();
        values
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|&gap| gap > 0)
            .collect()
    }

    fn name(&self) -> &'static str {
        "adjacent-differences"
    }
}

/// Continued-fraction expansion of each measured phase `value / 2^width`.
///
/// Every convergent denominator below `max_denominator` is a candidate.
/// Outcomes are visited most frequent first; repeated denominators are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuedFractions {
    max_denominator: u64,
}

impl ContinuedFractions {
    /// Denominators are kept only while they stay below `max_denominator`
    /// (usually N, since the order of `a` is below N).
    pub fn new(max_denominator: u64) -> Self {
        Self { max_denominator }
    }
}

impl CandidateStrategy for ContinuedFractions {
    fn guess_candidates(&self, distribution: &OutcomeDistribution) -> Vec<u64> {
        let scale = 1u64 << distribution.width();
        let mut candidates: Vec<u64> = Vec::new();

        for (value, _) in distribution.by_frequency() {
            if value == 0 {
                continue;
            }
            for q in convergent_denominators(value, scale) {
                if q >= self.max_denominator {
                    break;
                }
                if !candidates.contains(&q) {
                    candidates.push(q);
                }
            }
        }
        candidates
    }

    fn name(&self) -> &'static str {
        "continued-fractions"
    }
}

/// Denominators of the convergents of `numerator / denominator`, in order.
fn convergent_denominators(numerator: u64, denominator: u64) -> Vec<u64> {
    let mut out = Vec::new();
    let (mut p, mut q) = (numerator, denominator);
    // k_{n-2}, k_{n-1}
    let (mut prev2, mut prev1) = (1u64, 0u64);
    while q != 0 {
        let term = p / q;
        let k = term.saturating_mul(prev1).saturating_add(prev2);
        out.push(k);
        prev2 = prev1;
        prev1 = k;
        (p, q) = (q, p % q);
    }
    out
}
