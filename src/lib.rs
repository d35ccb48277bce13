// src/lib.rs

//! `qshor` - Simulated Shor period finding with classical factor reduction
//!
//! The crate builds the phase-estimation circuit for `a^x mod N` as a
//! declarative model, hands it to a measurement simulator, extracts the
//! period of `a` from the simulated outcome distribution and reduces that
//! period to a verified factor pair of `N`.

pub mod core;
pub mod arithmetic;
pub mod operations;
pub mod circuits;
pub mod oracle;
pub mod simulation;
pub mod period;
pub mod factor;
pub mod shor;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{QubitId, ShorError, StateVector};
pub use arithmetic::{gcd, multiplicative_order, power_mod, target_width};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use oracle::PhaseOracleModel;
pub use simulation::{MeasurementSimulator, OutcomeDistribution, PhasePeak, StateVectorSimulator};
pub use period::{
    AdjacentDifferences, CandidateStrategy, ContinuedFractions, PeriodEstimate, PeriodExtractor,
    PeriodSource, StrategyKind, extract_period,
};
pub use factor::{FactorPair, reduce_to_factors};
pub use shor::{FactorOutcome, FailureReason, Resolution, Shor, ShorConfig, ShorRun, Stage, factor};

// Example 1: Factoring 15
// The top-level entry point uses the default configuration (8 counting
// qubits, 1024 shots, seeded sampling) and reports failure as `(None, None)`.
/// ```
/// use qshor::{factor, ShorError};
///
/// fn main() -> Result<(), ShorError> {
///     let (f1, f2) = factor(15, 7)?;
///     match (f1, f2) {
///         (Some(f1), Some(f2)) => {
///             println!("15 = {} x {}", f1, f2);
///             assert_eq!(f1 * f2, 15);
///         }
///         _ => println!("unlucky draw, retry with another base"),
///     }
///
///     // A base sharing a factor with N short-circuits without simulation.
///     assert_eq!(factor(15, 6)?, (Some(3), Some(5)));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Plugging in a measurement backend
// Any type implementing `MeasurementSimulator` can stand in for the bundled
// state-vector simulator; here a fixed distribution with peaks 4 apart.
/// ```
/// use qshor::{
///     FactorOutcome, MeasurementSimulator, OutcomeDistribution, PhaseOracleModel, Shor,
///     ShorConfig, ShorError,
/// };
///
/// struct Peaks;
///
/// impl MeasurementSimulator for Peaks {
///     fn simulate(&self, model: &PhaseOracleModel, shots: u64) -> Result<OutcomeDistribution, ShorError> {
///         let quarter = shots / 4;
///         OutcomeDistribution::from_values(
///             model.counting_width(),
///             [(0, shots - 3 * quarter), (4, quarter), (8, quarter), (12, quarter)],
///         )
///     }
/// }
///
/// let shor = Shor::with_simulator(ShorConfig::default().with_counting_width(4), Peaks);
/// let outcome = shor.factor(15, 7).expect("valid input");
/// assert_eq!(outcome.pair().map(|p| p.into_tuple()), Some((3, 5)));
/// assert!(matches!(outcome, FactorOutcome::Factors { .. }));
/// ```
#[doc(hidden)]
const _: () = ();
