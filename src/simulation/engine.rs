// src/simulation/engine.rs
use crate::core::{MAX_SIMULATED_QUBITS, QubitId, ShorError, StateVector};
use crate::operations::Operation;
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense state-vector evolution of a phase-estimation circuit.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Amplitudes of all `2^num_qubits` basis states; qubit `k` is bit `k` of the index.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes `num_qubits` qubits in `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, ShorError> {
        if num_qubits == 0 {
            return Err(ShorError::simulation("Cannot initialize simulation engine with zero qubits"));
        }
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(ShorError::simulation(format!(
                "{} qubits exceed the simulator limit of {}",
                num_qubits, MAX_SIMULATED_QUBITS
            )));
        }
        Ok(Self {
            state: StateVector::ground(1usize << num_qubits),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), ShorError> {
        if state.dim() != self.state.dim() {
            return Err(ShorError::simulation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies one evolving operation. `Measure` is handled by the caller.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), ShorError> {
        match op {
            Operation::Superposition { target } | Operation::BasisChange { target } => {
                let bit = self.bit_of(target)?;
                self.apply_single_qubit_gate(bit, &hadamard_matrix());
            }
            Operation::ControlledPhase { control, target, theta } => {
                let c = self.bit_of(control)?;
                let t = self.bit_of(target)?;
                if c == t {
                    return Err(ShorError::simulation(
                        "Control and target qubits cannot be the same for a controlled phase",
                    ));
                }
                self.apply_controlled_phase(c, t, *theta);
            }
            Operation::Barrier { .. } => {}
            Operation::Measure { .. } => {
                return Err(ShorError::simulation(
                    "Measure operation should not be passed directly to apply_operation",
                ));
            }
        }
        Ok(())
    }

    /// Marginal probability of every value of the register formed by `measured`,
    /// where `measured[j]` contributes bit `j` of the value.
    pub(crate) fn register_probabilities(&self, measured: &[QubitId]) -> Result<Vec<f64>, ShorError> {
        let bits = measured.iter().map(|q| self.bit_of(q)).collect::<Result<Vec<_>, _>>()?;
        let mut probabilities = vec![0.0; 1usize << bits.len()];
        for (k, amp) in self.state.amplitudes().iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let value = bits
                .iter()
                .enumerate()
                .fold(0usize, |acc, (j, &bit)| acc | (((k >> bit) & 1) << j));
            probabilities[value] += p;
        }
        Ok(probabilities)
    }

    fn bit_of(&self, qubit: &QubitId) -> Result<usize, ShorError> {
        if qubit.bit() >= self.num_qubits {
            return Err(ShorError::simulation(format!(
                "{} is outside the {}-qubit register",
                qubit, self.num_qubits
            )));
        }
        Ok(qubit.bit())
    }

    /// Applies a 2x2 matrix to the qubit at `bit`, pairing basis states that differ only there.
    fn apply_single_qubit_gate(&mut self, bit: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << bit;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = amps[i0];
            let psi_1 = amps[i1];
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// diag(1, 1, 1, e^(iθ)) on the (control, target) pair.
    fn apply_controlled_phase(&mut self, control: usize, target: usize, theta: f64) {
        let both = (1usize << control) | (1usize << target);
        let phase = Complex::from_polar(1.0, theta);
        for (k, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if k & both == both {
                *amp *= phase;
            }
        }
    }
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn qid(id: usize) -> QubitId {
        QubitId(id)
    }

    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, actual[i], expected[i], context
            );
        }
    }

    #[test]
    fn init_bounds() {
        assert!(SimulationEngine::init(0).is_err());
        assert!(SimulationEngine::init(MAX_SIMULATED_QUBITS + 1).is_err());
        let engine = SimulationEngine::init(2).unwrap();
        assert_eq!(engine.state().dim(), 4);
        assert_eq!(engine.state().amplitudes()[0], Complex::new(1.0, 0.0));
    }

    #[test]
    fn superposition_on_qubit_one_uses_bit_one() -> Result<(), ShorError> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&Operation::Superposition { target: qid(1) })?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        // |00> + |10>, indices 0 and 2
        assert_complex_vec_approx_equal(
            engine.state().amplitudes(),
            &[h, Complex::zero(), h, Complex::zero()],
            "H on q1",
        );
        Ok(())
    }

    #[test]
    fn basis_change_undoes_superposition() -> Result<(), ShorError> {
        let mut engine = SimulationEngine::init(1)?;
        engine.apply_operation(&Operation::Superposition { target: qid(0) })?;
        engine.apply_operation(&Operation::BasisChange { target: qid(0) })?;
        assert_complex_vec_approx_equal(
            engine.state().amplitudes(),
            &[Complex::new(1.0, 0.0), Complex::zero()],
            "H H = I",
        );
        Ok(())
    }

    #[test]
    fn controlled_phase_only_touches_both_set() -> Result<(), ShorError> {
        let mut engine = SimulationEngine::init(2)?;
        let half = Complex::new(0.5, 0.0);
        engine.set_state(StateVector::new(vec![half; 4]))?;
        engine.apply_operation(&Operation::ControlledPhase {
            control: qid(0),
            target: qid(1),
            theta: std::f64::consts::PI,
        })?;
        assert_complex_vec_approx_equal(
            engine.state().amplitudes(),
            &[half, half, half, -half],
            "CP(pi)",
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_operations() -> Result<(), ShorError> {
        let mut engine = SimulationEngine::init(2)?;
        let same = Operation::ControlledPhase { control: qid(1), target: qid(1), theta: 1.0 };
        assert!(engine.apply_operation(&same).is_err());
        assert!(engine.apply_operation(&Operation::BasisChange { target: qid(2) }).is_err());
        assert!(engine.apply_operation(&Operation::Measure { targets: vec![qid(0)] }).is_err());
        assert!(engine.apply_operation(&Operation::Barrier { label: None }).is_ok());
        Ok(())
    }

    #[test]
    fn register_probabilities_marginalize_unmeasured_qubits() -> Result<(), ShorError> {
        let mut engine = SimulationEngine::init(3)?;
        engine.apply_operation(&Operation::Superposition { target: qid(0) })?;
        engine.apply_operation(&Operation::Superposition { target: qid(2) })?;
        // Register (q2, q0): value bit 0 <- q2, bit 1 <- q0
        let probs = engine.register_probabilities(&[qid(2), qid(0)])?;
        assert_eq!(probs.len(), 4);
        for p in &probs {
            assert!((p - 0.25).abs() < TEST_TOLERANCE);
        }
        let only_q1 = engine.register_probabilities(&[qid(1)])?;
        assert!((only_q1[0] - 1.0).abs() < TEST_TOLERANCE);
        assert!(only_q1[1].abs() < TEST_TOLERANCE);
        Ok(())
    }
}
