// src/period/mod.rs

//! Classical post-processing: from a measured distribution to a period `r`
//! with `a^r ≡ 1 (mod N)`.
//!
//! Candidates from the distribution are tried first, in the order the
//! strategy yields them; the first one passing the exact check wins, even
//! if it is a multiple of the true order. When none passes, a plain search
//! over `1..N` guarantees the order is found for any base coprime with N.

mod strategy;

pub use strategy::{AdjacentDifferences, CandidateStrategy, ContinuedFractions};

use crate::arithmetic::{multiplicative_order, power_mod};
use crate::simulation::OutcomeDistribution;
use std::fmt;
use tracing::{debug, warn};

/// Where an extracted period came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodSource {
    /// A distribution-derived candidate passed the exact check.
    Distribution,
    /// No candidate passed; the exhaustive search produced the order.
    ExhaustiveSearch,
}

/// A validated period together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodEstimate {
    /// `r` with `a^r mod N == 1`.
    pub period: u64,
    /// Which phase of the extraction produced `period`.
    pub source: PeriodSource,
    /// How many distribution candidates were examined.
    pub candidates_tried: usize,
}

impl fmt::Display for PeriodEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            PeriodSource::Distribution => "distribution",
            PeriodSource::ExhaustiveSearch => "exhaustive search",
        };
        write!(f, "r={} (from {}, {} candidates tried)", self.period, source, self.candidates_tried)
    }
}

/// Selects the candidate strategy by name, for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Sorted adjacent differences of observed values.
    #[default]
    AdjacentDifferences,
    /// Continued-fraction convergents of observed phases.
    ContinuedFractions,
}

impl StrategyKind {
    /// Instantiates the strategy for factoring `n`.
    pub fn for_modulus(self, n: u64) -> Box<dyn CandidateStrategy + Send + Sync> {
        match self {
            StrategyKind::AdjacentDifferences => Box::new(AdjacentDifferences),
            StrategyKind::ContinuedFractions => Box::new(ContinuedFractions::new(n)),
        }
    }
}

/// Period extraction with a pluggable candidate strategy.
pub struct PeriodExtractor<S = AdjacentDifferences> {
    strategy: S,
}

impl Default for PeriodExtractor<AdjacentDifferences> {
    fn default() -> Self {
        Self { strategy: AdjacentDifferences }
    }
}

impl<S: CandidateStrategy> PeriodExtractor<S> {
    /// Creates an extractor that asks `strategy` for candidates.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Extracts a period of `a` modulo `n` from `distribution`.
    ///
    /// Returns `None` only when neither the candidates nor the exhaustive
    /// search find an `r` (a not coprime with n, or n < 2).
    pub fn extract(&self, distribution: &OutcomeDistribution, n: u64, a: u64) -> Option<PeriodEstimate> {
        if n < 2 {
            return None;
        }
        let candidates = self.strategy.guess_candidates(distribution);
        debug!(strategy = self.strategy.name(), count = candidates.len(), "period candidates");
        select(&candidates, n, a)
    }

    /// Extraction for a run whose backend produced no distribution: the
    /// candidate list is empty, so the exhaustive search decides.
    pub fn extract_without_distribution(&self, n: u64, a: u64) -> Option<PeriodEstimate> {
        if n < 2 {
            return None;
        }
        select(&[], n, a)
    }
}

fn select(candidates: &[u64], n: u64, a: u64) -> Option<PeriodEstimate> {
    for (i, &r) in candidates.iter().enumerate() {
        if r > 0 && power_mod(a, r, n) == 1 {
            return Some(PeriodEstimate {
                period: r,
                source: PeriodSource::Distribution,
                candidates_tried: i + 1,
            });
        }
    }

    match multiplicative_order(a, n) {
        Some(r) => {
            debug!(r, "no candidate validated, exhaustive search used");
            Some(PeriodEstimate {
                period: r,
                source: PeriodSource::ExhaustiveSearch,
                candidates_tried: candidates.len(),
            })
        }
        None => {
            warn!(n, a, "no period exists below N");
            None
        }
    }
}

/// Extracts a period with the default adjacent-differences strategy.
pub fn extract_period(distribution: &OutcomeDistribution, n: u64, a: u64) -> Option<u64> {
    PeriodExtractor::default().extract(distribution, n, a).map(|e| e.period)
}
