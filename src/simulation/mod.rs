// src/simulation/mod.rs

//! The measurement boundary of the pipeline.
//!
//! `MeasurementSimulator` is the contract the orchestrator depends on: give it
//! a `PhaseOracleModel` and a shot count, get back an `OutcomeDistribution`.
//! `StateVectorSimulator` is the bundled backend, a dense state-vector
//! evolution followed by seeded sampling of the counting register.

mod results;
pub(crate) mod engine;

pub use results::{OutcomeDistribution, PhasePeak};

use crate::core::{DEFAULT_SEED, ShorError};
use crate::operations::Operation;
use crate::oracle::PhaseOracleModel;
use crate::validation::check_normalization;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Executes a phase-estimation model for a number of trials.
///
/// Implementations must return a distribution whose bitstrings are
/// `model.counting_width()` wide and whose frequencies sum to `shots`.
/// Sampling noise is expected; callers tolerate it.
pub trait MeasurementSimulator {
    /// Runs `model` `shots` times and returns the observed outcome frequencies.
    fn simulate(&self, model: &PhaseOracleModel, shots: u64) -> Result<OutcomeDistribution, ShorError>;
}

impl<S: MeasurementSimulator + ?Sized> MeasurementSimulator for &S {
    fn simulate(&self, model: &PhaseOracleModel, shots: u64) -> Result<OutcomeDistribution, ShorError> {
        (**self).simulate(model, shots)
    }
}

/// Deterministic state-vector backend.
///
/// The sampler is seeded from the configured seed together with the model
/// parameters and shot count, so identical requests give identical
/// distributions while different models do not share a sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateVectorSimulator {
    seed: u64,
}

impl Default for StateVectorSimulator {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl StateVectorSimulator {
    /// Creates a simulator with the default seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with an explicit sampler seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The configured sampler seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Exact probability of every counting-register value, before sampling.
    ///
    /// # Errors
    /// Fails if the model is too wide to simulate, has no measurement, or the
    /// evolved state is not normalized.
    pub fn exact_probabilities(&self, model: &PhaseOracleModel) -> Result<Vec<f64>, ShorError> {
        let circuit = model.circuit();
        let mut engine = SimulationEngine::init(model.num_qubits().max(circuit.width()))?;
        let mut measured = None;

        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => measured = Some(targets.as_slice()),
                _ => engine.apply_operation(op)?,
            }
        }
        check_normalization(engine.state(), None)?;

        let measured = measured.ok_or_else(|| ShorError::simulation("model contains no measurement"))?;
        engine.register_probabilities(measured)
    }

    fn sampler_for(&self, model: &PhaseOracleModel, shots: u64) -> StdRng {
        let seed = sampler_seed(
            self.seed,
            [model.modulus(), model.base(), model.counting_width() as u64, shots],
        );
        StdRng::seed_from_u64(seed)
    }
}

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Folds the request parameters into the configured seed with a fixed
/// multiply-rotate combine, so a seed names the same sample stream on every toolchain.
fn sampler_seed(seed: u64, params: [u64; 4]) -> u64 {
    params
        .iter()
        .fold(seed, |acc, &v| (acc ^ v).wrapping_mul(SEED_MIX).rotate_left(29))
}

impl MeasurementSimulator for StateVectorSimulator {
    fn simulate(&self, model: &PhaseOracleModel, shots: u64) -> Result<OutcomeDistribution, ShorError> {
        if shots == 0 {
            return Err(ShorError::invalid_input("shot count must be positive"));
        }
        let probabilities = self.exact_probabilities(model)?;

        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut running = 0.0;
        for p in &probabilities {
            running += p;
            cumulative.push(running);
        }

        let mut rng = self.sampler_for(model, shots);
        let mut counts = vec![0u64; probabilities.len()];
        for _ in 0..shots {
            let sample: f64 = rng.random::<f64>() * running;
            // Floating-point slack can leave sample == running; clamp to the last outcome.
            let index = cumulative.partition_point(|&c| c <= sample).min(counts.len() - 1);
            counts[index] += 1;
        }

        let distribution = OutcomeDistribution::from_values(
            model.counting_width(),
            counts.into_iter().enumerate().map(|(value, f)| (value as u64, f)),
        )?;
        debug!(
            n = model.modulus(),
            a = model.base(),
            shots,
            distinct = distribution.len(),
            "simulated phase estimation"
        );
        Ok(distribution)
    }
}
