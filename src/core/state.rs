// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitude vector of the full simulated register (counting + target qubits).
///
/// Index `k` holds the amplitude of basis state `|k>`, where qubit `q` is
/// bit `q` of `k`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a state from raw amplitudes. No normalization is enforced here;
    /// `validation::check_normalization` is the place for that.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The all-zero basis state `|0...0>` of the given dimension.
    pub(crate) fn ground(dim: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        if let Some(first) = amplitudes.first_mut() {
            *first = Complex::one();
        }
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
