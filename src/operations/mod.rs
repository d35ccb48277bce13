// src/operations/mod.rs

//! The gate vocabulary of a phase-estimation circuit.
//!
//! Only what period finding needs is modelled: putting a qubit into equal
//! superposition, conditional phase kicks between two qubits, the basis change
//! closing the inverse transform, stage barriers and the final measurement.

use crate::core::QubitId;

/// A single step of a circuit description.
#[derive(Debug, Clone, PartialEq)] // f64 angles rule out Eq
pub enum Operation {
    /// Prepares the target in an equal superposition of `|0>` and `|1>`.
    ///
    /// Analogy: the initial Hadamard layer on the counting register.
    Superposition {
        /// Qubit being prepared.
        target: QubitId,
    },

    /// Applies the phase `e^(iθ)` to the basis states in which both `control`
    /// and `target` are `|1>`. Symmetric in its two qubits.
    ControlledPhase {
        /// Qubit that conditions the phase kick.
        control: QubitId,
        /// Qubit receiving the phase kick.
        target: QubitId,
        /// Phase angle in radians.
        theta: f64,
    },

    /// Hadamard-equivalent basis change closing each step of the inverse transform.
    BasisChange {
        /// Qubit being rotated.
        target: QubitId,
    },

    /// Separates circuit stages. Has no effect on the simulated state.
    Barrier {
        /// Optional stage label shown in diagrams.
        label: Option<String>,
    },

    /// Measures `targets`; `targets[k]` is recorded as classical bit `k`.
    Measure {
        /// Qubits read out, in classical-bit order.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns every qubit referenced by the operation.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Superposition { target } => vec![*target],
            Operation::ControlledPhase { control, target, .. } => vec![*control, *target],
            Operation::BasisChange { target } => vec![*target],
            Operation::Barrier { .. } => Vec::new(),
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Short symbol used by the circuit diagram.
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Operation::Superposition { .. } | Operation::BasisChange { .. } => "H",
            Operation::ControlledPhase { .. } => "P",
            Operation::Barrier { .. } => "░",
            Operation::Measure { .. } => "M",
        }
    }
}
