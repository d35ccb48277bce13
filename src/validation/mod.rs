// src/validation/mod.rs

//! Precondition and invariant checks shared by the pipeline stages.

use crate::core::{ShorError, StateVector};
use crate::simulation::OutcomeDistribution;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks the arguments of a factoring request: `N >= 2` and `0 < a < N`.
///
/// `a = 1` passes here; it is coprime with every N and is resolved by the
/// orchestrator as a period-1 (odd) case.
pub fn validate_factoring_input(n: u64, a: u64) -> Result<(), ShorError> {
    if n < 2 {
        return Err(ShorError::invalid_input(format!("N must be at least 2, got {}", n)));
    }
    if a == 0 || a >= n {
        return Err(ShorError::invalid_input(format!(
            "base must satisfy 0 < a < N, got a={} for N={}",
            a, n
        )));
    }
    Ok(())
}

/// Checks the parameters a phase-estimation model is defined for:
/// `N > 1`, `a > 1` and a non-empty counting register.
pub fn validate_model_input(n: u64, a: u64, counting_width: usize) -> Result<(), ShorError> {
    if n <= 1 {
        return Err(ShorError::invalid_input(format!("model undefined for N={}", n)));
    }
    if a <= 1 {
        return Err(ShorError::invalid_input(format!("model undefined for base a={}", a)));
    }
    if counting_width == 0 {
        return Err(ShorError::invalid_input("counting register needs at least one qubit"));
    }
    Ok(())
}

/// Checks that the squared amplitudes of `state` sum to 1.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance (default `1e-9`).
/// * `Err(ShorError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), ShorError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(ShorError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that a distribution returned by a simulator matches the model it ran:
/// bitstrings as wide as the counting register and counts summing to `shots`.
pub fn check_distribution(
    distribution: &OutcomeDistribution,
    counting_width: usize,
    shots: u64,
) -> Result<(), ShorError> {
    if distribution.width() != counting_width {
        return Err(ShorError::InvalidDistribution {
            message: format!(
                "bitstrings are {} wide, counting register has {} qubits",
                distribution.width(),
                counting_width
            ),
        });
    }
    if distribution.shots() != shots {
        return Err(ShorError::InvalidDistribution {
            message: format!("frequencies sum to {}, expected {} shots", distribution.shots(), shots),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn factoring_input_bounds() {
        assert!(validate_factoring_input(15, 7).is_ok());
        assert!(validate_factoring_input(15, 1).is_ok());
        assert!(validate_factoring_input(8, 3).is_ok());
        assert!(matches!(validate_factoring_input(1, 1), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(validate_factoring_input(15, 0), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(validate_factoring_input(15, 15), Err(ShorError::InvalidInput { .. })));
        assert!(matches!(validate_factoring_input(2, 1), Ok(())));
    }

    #[test]
    fn normalization_check() {
        let good = StateVector::new(vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)]);
        assert!(check_normalization(&good, None).is_ok());

        let bad = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
        assert!(matches!(check_normalization(&bad, None), Err(ShorError::Incoherence { .. })));
        assert!(check_normalization(&bad, Some(1.5)).is_ok());
    }

    #[test]
    fn distribution_shape_check() -> Result<(), ShorError> {
        let dist = OutcomeDistribution::from_counts(3, [("000".to_string(), 6), ("101".to_string(), 4)])?;
        assert!(check_distribution(&dist, 3, 10).is_ok());
        assert!(matches!(check_distribution(&dist, 4, 10), Err(ShorError::InvalidDistribution { .. })));
        assert!(matches!(check_distribution(&dist, 3, 11), Err(ShorError::InvalidDistribution { .. })));
        Ok(())
    }
}
