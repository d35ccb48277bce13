// src/shor/mod.rs

//! The factoring pipeline.
//!
//! A run moves linearly through
//! `Start → DegenerateCheck → BuildModel → Simulate → ExtractPeriod → CheckParity → Reduce → Done`
//! and never steps back. Invalid arguments are the only errors; every expected
//! failure of the probabilistic method ends the run with
//! `FactorOutcome::NotFound`. Nothing is retried: choosing another base is
//! the caller's decision.

mod config;

pub use config::ShorConfig;

use crate::arithmetic::{gcd, multiplicative_order};
use crate::core::ShorError;
use crate::factor::{FactorPair, reduce_to_factors};
use crate::oracle::PhaseOracleModel;
use crate::period::{PeriodEstimate, PeriodExtractor, PeriodSource};
use crate::simulation::{MeasurementSimulator, OutcomeDistribution, StateVectorSimulator};
use crate::validation::{check_distribution, validate_factoring_input};
use std::fmt;
use tracing::{debug, info, warn};

/// Stages of a factoring run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Start,
    DegenerateCheck,
    BuildModel,
    Simulate,
    ExtractPeriod,
    CheckParity,
    Reduce,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::DegenerateCheck => "degenerate-check",
            Stage::BuildModel => "build-model",
            Stage::Simulate => "simulate",
            Stage::ExtractPeriod => "extract-period",
            Stage::CheckParity => "check-parity",
            Stage::Reduce => "reduce",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a successful run obtained its factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The base already shared a factor with N; no simulation was run.
    CommonFactor,
    /// The factors were reduced from this period.
    Period(PeriodEstimate),
}

/// Why a run ended without factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Neither the distribution nor the exhaustive search produced a period.
    PeriodNotFound,
    /// The period is odd and cannot be halved.
    OddPeriod(u64),
    /// The period is even but the gcd split does not multiply back to N.
    VerificationFailure(u64),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::PeriodNotFound => write!(f, "no period found"),
            FailureReason::OddPeriod(r) => write!(f, "period {} is odd", r),
            FailureReason::VerificationFailure(r) => write!(f, "period {} did not split N", r),
        }
    }
}

/// Result of a completed factoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorOutcome {
    /// A verified pair with product N (possibly trivial).
    Factors {
        pair: FactorPair,
        via: Resolution,
    },
    /// The attempt failed; retry with a different base.
    NotFound(FailureReason),
}

impl FactorOutcome {
    /// The factor pair, if the run succeeded.
    pub fn pair(&self) -> Option<FactorPair> {
        match self {
            FactorOutcome::Factors { pair, .. } => Some(*pair),
            FactorOutcome::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FactorOutcome::Factors { .. })
    }

    /// `(Some(f1), Some(f2))` on success, `(None, None)` otherwise.
    pub fn as_options(&self) -> (Option<u64>, Option<u64>) {
        match self.pair() {
            Some(pair) => (Some(pair.first()), Some(pair.second())),
            None => (None, None),
        }
    }
}

impl fmt::Display for FactorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorOutcome::Factors { pair, via: Resolution::CommonFactor } => {
                write!(f, "{} (common factor with base)", pair)
            }
            FactorOutcome::Factors { pair, via: Resolution::Period(estimate) } => {
                write!(f, "{} ({})", pair, estimate)
            }
            FactorOutcome::NotFound(reason) => write!(f, "not found: {}", reason),
        }
    }
}

/// A finished run with the intermediate values it produced.
///
/// `model` and `distribution` are absent when the run short-circuited before
/// simulating (common factor, or the trivial base 1). `distribution` alone is
/// absent when the backend could not run the model.
#[derive(Debug, Clone)]
pub struct ShorRun {
    pub outcome: FactorOutcome,
    pub model: Option<PhaseOracleModel>,
    pub distribution: Option<OutcomeDistribution>,
}

/// Runs the factoring pipeline against a measurement backend.
///
/// Holds only immutable configuration and the simulator, so independent runs
/// may be issued concurrently from several threads if `S` allows it.
pub struct Shor<S = StateVectorSimulator> {
    config: ShorConfig,
    simulator: S,
}

impl Shor<StateVectorSimulator> {
    /// Default configuration with the bundled simulator.
    pub fn new() -> Self {
        Self::with_config(ShorConfig::default())
    }

    /// The bundled simulator, seeded from `config`.
    pub fn with_config(config: ShorConfig) -> Self {
        Self {
            simulator: StateVectorSimulator::with_seed(config.seed()),
            config,
        }
    }
}

impl Default for Shor<StateVectorSimulator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MeasurementSimulator> Shor<S> {
    /// Uses `simulator` as the measurement backend.
    pub fn with_simulator(config: ShorConfig, simulator: S) -> Self {
        Self { config, simulator }
    }

    pub fn config(&self) -> &ShorConfig {
        &self.config
    }

    /// Attempts to split `n` using base `a`.
    ///
    /// # Errors
    /// `ShorError::InvalidInput` for `n < 2`, `a == 0`, `a >= n` or an invalid
    /// configuration. A backend `SimulationError` is not an error of the run:
    /// extraction falls back to the exhaustive search. Other backend errors
    /// (malformed distributions, incoherent states) are passed through.
    pub fn factor(&self, n: u64, a: u64) -> Result<FactorOutcome, ShorError> {
        self.run(n, a).map(|run| run.outcome)
    }

    /// Like [`Shor::factor`], also returning the model and distribution used.
    pub fn run(&self, n: u64, a: u64) -> Result<ShorRun, ShorError> {
        enter(Stage::Start, n, a);
        self.config.validate()?;
        validate_factoring_input(n, a)?;

        enter(Stage::DegenerateCheck, n, a);
        let d = gcd(a, n);
        if d != 1 {
            let pair = FactorPair::from_divisor(d, n);
            let outcome = FactorOutcome::Factors { pair, via: Resolution::CommonFactor };
            return Ok(finish(n, a, outcome, None, None));
        }

        if a == 1 {
            // 1 is its own period-1 orbit; the circuit is undefined for it.
            let estimate = multiplicative_order(a, n).map(|period| PeriodEstimate {
                period,
                source: PeriodSource::ExhaustiveSearch,
                candidates_tried: 0,
            });
            let outcome = conclude(n, a, estimate);
            return Ok(finish(n, a, outcome, None, None));
        }

        enter(Stage::BuildModel, n, a);
        let model = PhaseOracleModel::new(n, a, self.config.counting_width())?;

        enter(Stage::Simulate, n, a);
        let distribution = match self.simulator.simulate(&model, self.config.shots()) {
            Ok(distribution) => {
                check_distribution(&distribution, model.counting_width(), self.config.shots())?;
                Some(distribution)
            }
            // The candidates only speed up extraction; the exhaustive search needs no distribution.
            Err(ShorError::SimulationError { message }) => {
                warn!(n, a, qubits = model.num_qubits(), %message, "backend cannot run the model");
                None
            }
            Err(err) => return Err(err),
        };

        enter(Stage::ExtractPeriod, n, a);
        let extractor = PeriodExtractor::new(self.config.strategy().for_modulus(n));
        let estimate = match &distribution {
            Some(distribution) => extractor.extract(distribution, n, a),
            None => extractor.extract_without_distribution(n, a),
        };

        let outcome = conclude(n, a, estimate);
        Ok(finish(n, a, outcome, Some(model), distribution))
    }
}

/// CheckParity and Reduce.
fn conclude(n: u64, a: u64, estimate: Option<PeriodEstimate>) -> FactorOutcome {
    enter(Stage::CheckParity, n, a);
    let Some(estimate) = estimate else {
        return FactorOutcome::NotFound(FailureReason::PeriodNotFound);
    };
    if estimate.period % 2 != 0 {
        return FactorOutcome::NotFound(FailureReason::OddPeriod(estimate.period));
    }

    enter(Stage::Reduce, n, a);
    match reduce_to_factors(a, estimate.period, n) {
        Some(pair) => FactorOutcome::Factors { pair, via: Resolution::Period(estimate) },
        None => FactorOutcome::NotFound(FailureReason::VerificationFailure(estimate.period)),
    }
}

fn enter(stage: Stage, n: u64, a: u64) {
    debug!(%stage, n, a, "entering stage");
}

fn finish(
    n: u64,
    a: u64,
    outcome: FactorOutcome,
    model: Option<PhaseOracleModel>,
    distribution: Option<OutcomeDistribution>,
) -> ShorRun {
    enter(Stage::Done, n, a);
    info!(n, a, %outcome, "factoring run finished");
    ShorRun { outcome, model, distribution }
}

/// Factors `n` with base `a` using the default configuration and the bundled simulator.
///
/// Returns `(Some(f1), Some(f2))` with `f1 * f2 == n` on success and
/// `(None, None)` on every expected failure.
///
/// # Errors
/// `ShorError::InvalidInput` for `n < 2`, `a == 0` or `a >= n`.
pub fn factor(n: u64, a: u64) -> Result<(Option<u64>, Option<u64>), ShorError> {
    Shor::new().factor(n, a).map(|outcome| outcome.as_options())
}
