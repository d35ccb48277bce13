// src/oracle/mod.rs

//! Declarative description of the phase-estimation circuit for `a^x mod N`.
//!
//! The model is a value object handed unchanged to a `MeasurementSimulator`.
//! It never executes anything itself.

use crate::arithmetic::{power_mod, target_width};
use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{DISPLAY_COUNTING_WIDTH, PI, QubitId, ShorError};
use crate::operations::Operation;
use crate::validation::validate_model_input;
use std::fmt;

/// The circuit a period-finding run would execute, with the parameters it was built from.
///
/// Qubits `0..counting_width` form the counting register; the following
/// `target_width` qubits form the target register.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseOracleModel {
    modulus: u64,
    base: u64,
    counting_width: usize,
    target_width: usize,
    phase_factors: Vec<u64>,
    circuit: Circuit,
}

impl PhaseOracleModel {
    /// Builds the full phase-estimation model for `base` modulo `modulus`.
    ///
    /// # Errors
    /// `ShorError::InvalidInput` if `modulus <= 1`, `base <= 1` or
    /// `counting_width == 0`.
    pub fn new(modulus: u64, base: u64, counting_width: usize) -> Result<Self, ShorError> {
        validate_model_input(modulus, base, counting_width)?;

        let target_width = target_width(modulus);
        let counting: Vec<QubitId> = (0..counting_width).map(QubitId).collect();
        let targets: Vec<QubitId> = (counting_width..counting_width + target_width).map(QubitId).collect();

        let mut builder = CircuitBuilder::new()
            .add_ops(counting.iter().map(|&q| Operation::Superposition { target: q }))
            .barrier("H⊗n");

        // factor_{i+1} = factor_i^2 mod N, so no 2^i exponent is ever materialized.
        let mut phase_factors = Vec::with_capacity(counting_width);
        let mut factor = base % modulus;
        for &control in &counting {
            phase_factors.push(factor);
            let theta = 2.0 * PI * factor as f64 / modulus as f64;
            builder = builder.add_ops(targets.iter().map(|&target| Operation::ControlledPhase {
                control,
                target,
                theta,
            }));
            factor = power_mod(factor, 2, modulus);
        }
        builder = builder.barrier("Controlled-Ua");

        // Inverse transform, strictly descending over counting bits.
        for i in (0..counting_width).rev() {
            for j in 0..i {
                builder = builder.add_op(Operation::ControlledPhase {
                    control: QubitId(j),
                    target: QubitId(i),
                    theta: -PI / 2f64.powi((i - j) as i32),
                });
            }
            builder = builder.add_op(Operation::BasisChange { target: QubitId(i) });
        }

        let circuit = builder
            .barrier("QFT†")
            .add_op(Operation::Measure { targets: counting })
            .build();

        Ok(Self {
            modulus,
            base,
            counting_width,
            target_width,
            phase_factors,
            circuit,
        })
    }

    /// Builds the reduced outline used for circuit diagrams: a 3-bit counting
    /// register, one representative controlled phase of `2π/N` and plain basis
    /// changes in place of the full inverse transform.
    ///
    /// # Errors
    /// Same validation as [`PhaseOracleModel::new`].
    pub fn display_outline(modulus: u64, base: u64) -> Result<Self, ShorError> {
        let counting_width = DISPLAY_COUNTING_WIDTH;
        validate_model_input(modulus, base, counting_width)?;

        let target_width = target_width(modulus);
        let counting: Vec<QubitId> = (0..counting_width).map(QubitId).collect();

        let circuit = CircuitBuilder::new()
            .add_ops(counting.iter().map(|&q| Operation::Superposition { target: q }))
            .barrier("H⊗n")
            .add_op(Operation::ControlledPhase {
                control: QubitId(0),
                target: QubitId(counting_width),
                theta: 2.0 * PI / modulus as f64,
            })
            .barrier("Controlled-Ua")
            .add_ops((0..counting_width).rev().map(|i| Operation::BasisChange { target: QubitId(i) }))
            .barrier("QFT†")
            .add_op(Operation::Measure { targets: counting })
            .build();

        Ok(Self {
            modulus,
            base,
            counting_width,
            target_width,
            phase_factors: vec![1],
            circuit,
        })
    }

    /// The integer N being factored.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The base a whose powers are encoded.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Bits of phase precision (size of the counting register).
    pub fn counting_width(&self) -> usize {
        self.counting_width
    }

    /// `ceil(log2(N))`, the size of the target register.
    pub fn target_width(&self) -> usize {
        self.target_width
    }

    /// Total number of qubits the model acts on.
    pub fn num_qubits(&self) -> usize {
        self.counting_width + self.target_width
    }

    /// `a^(2^i) mod N` for each counting bit `i`.
    pub fn phase_factors(&self) -> &[u64] {
        &self.phase_factors
    }

    /// The ordered circuit description.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

impl fmt::Display for PhaseOracleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PhaseOracleModel(N={}, a={}, counting={}, target={})",
            self.modulus, self.base, self.counting_width, self.target_width
        )?;
        write!(f, "{}", self.circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controlled_phases(model: &PhaseOracleModel) -> Vec<(usize, usize, f64)> {
        model
            .circuit()
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::ControlledPhase { control, target, theta } => Some((control.0, target.0, *theta)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rejects_undefined_parameters() {
        assert!(matches!(PhaseOracleModel::new(1, 2, 8), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(PhaseOracleModel::new(15, 1, 8), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(PhaseOracleModel::new(15, 0, 8), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(PhaseOracleModel::new(15, 7, 0), Err(ShorError::InvalidInput { .. })));
        assert!(PhaseOracleModel::display_outline(15, 1).is_err());
    }

    #[test]
    fn phase_factors_are_repeated_squares() -> Result<(), ShorError> {
        let model = PhaseOracleModel::new(15, 7, 4)?;
        assert_eq!(model.phase_factors(), &[7, 4, 1, 1]);
        for (i, f) in model.phase_factors().iter().enumerate() {
            assert_eq!(*f, power_mod(7, 1 << i, 15));
        }
        Ok(())
    }

    #[test]
    fn registers_have_expected_sizes() -> Result<(), ShorError> {
        let model = PhaseOracleModel::new(21, 2, 8)?;
        assert_eq!(model.counting_width(), 8);
        assert_eq!(model.target_width(), 5);
        assert_eq!(model.num_qubits(), 13);
        assert_eq!(model.circuit().width(), 13);
        let measured: Vec<usize> = model.circuit().measured_qubits().unwrap_or(&[]).iter().map(|q| q.0).collect();
        assert_eq!(measured, (0..8).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn oracle_stage_links_each_counting_bit_to_every_target_qubit() -> Result<(), ShorError> {
        let model = PhaseOracleModel::new(15, 7, 3)?;
        let phases = controlled_phases(&model);
        // 3 counting bits x 4 target qubits, then 3 inverse-transform corrections
        assert_eq!(phases.len(), 3 * 4 + 3);

        let (control, target, theta) = phases[0];
        assert_eq!((control, target), (0, 3));
        assert!((theta - 2.0 * PI * 7.0 / 15.0).abs() < 1e-12);

        let (control, target, theta) = phases[4];
        assert_eq!((control, target), (1, 3));
        assert!((theta - 2.0 * PI * 4.0 / 15.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn inverse_transform_runs_in_descending_bit_order() -> Result<(), ShorError> {
        let model = PhaseOracleModel::new(15, 7, 3)?;
        let ops = model.circuit().operations();
        let start = ops
            .iter()
            .position(|op| matches!(op, Operation::Barrier { label: Some(l) } if l == "Controlled-Ua"))
            .unwrap_or(0)
            + 1;

        let expected = vec![
            Operation::ControlledPhase { control: QubitId(0), target: QubitId(2), theta: -PI / 4.0 },
            Operation::ControlledPhase { control: QubitId(1), target: QubitId(2), theta: -PI / 2.0 },
            Operation::BasisChange { target: QubitId(2) },
            Operation::ControlledPhase { control: QubitId(0), target: QubitId(1), theta: -PI / 2.0 },
            Operation::BasisChange { target: QubitId(1) },
            Operation::BasisChange { target: QubitId(0) },
        ];
        assert_eq!(&ops[start..start + expected.len()], expected.as_slice());
        Ok(())
    }

    #[test]
    fn display_outline_is_three_bits_wide() -> Result<(), ShorError> {
        let model = PhaseOracleModel::display_outline(15, 7)?;
        assert_eq!(model.counting_width(), 3);
        assert_eq!(controlled_phases(&model).len(), 1);
        let text = format!("{}", model);
        assert!(text.contains("PhaseOracleModel(N=15, a=7, counting=3, target=4)"));
        assert!(text.contains("stages: H⊗n | Controlled-Ua | QFT†"));
        Ok(())
    }
}
