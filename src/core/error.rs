//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier of a single qubit inside a phase-estimation circuit.
/// Qubit `k` is bit `k` of a basis-state index in the simulated state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Position of this qubit's bit within a basis-state index.
    pub fn bit(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures that stop a factoring run before it can produce an outcome.
///
/// Expected failures of the probabilistic method (no period, odd period,
/// unverifiable split) are *not* errors; they are reported through
/// `FactorOutcome::NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorError {
    /// Arguments outside the domain the algorithm is defined on
    /// (N < 2, a = 0, a >= N, zero counting width, zero shots).
    #[error("Invalid Input: {message}")]
    InvalidInput {
        /// InvalidInput failure message
        message: String,
    },

    /// The measurement backend could not execute the model.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// The simulated state lost normalization.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// An outcome distribution broke its shape invariants
    /// (mixed bitstring widths, non-binary characters).
    #[error("Invalid Distribution: {message}")]
    InvalidDistribution {
        /// InvalidDistribution failure message
        message: String,
    },
}

impl ShorError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        ShorError::InvalidInput { message: message.into() }
    }

    pub(crate) fn simulation(message: impl Into<String>) -> Self {
        ShorError::SimulationError { message: message.into() }
    }
}
