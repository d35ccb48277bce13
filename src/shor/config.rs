// src/shor/config.rs

use crate::core::{DEFAULT_COUNTING_WIDTH, DEFAULT_SEED, DEFAULT_SHOTS, ShorError};
use crate::period::StrategyKind;

/// Settings of a factoring run.
///
/// ```
/// use qshor::{ShorConfig, StrategyKind};
///
/// let config = ShorConfig::default()
///     .with_counting_width(6)
///     .with_shots(256)
///     .with_strategy(StrategyKind::ContinuedFractions);
/// assert_eq!(config.counting_width(), 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorConfig {
    counting_width: usize,
    shots: u64,
    seed: u64,
    strategy: StrategyKind,
}

impl Default for ShorConfig {
    fn default() -> Self {
        Self {
            counting_width: DEFAULT_COUNTING_WIDTH,
            shots: DEFAULT_SHOTS,
            seed: DEFAULT_SEED,
            strategy: StrategyKind::default(),
        }
    }
}

impl ShorConfig {
    /// Bits of phase precision in the counting register.
    pub fn with_counting_width(mut self, counting_width: usize) -> Self {
        self.counting_width = counting_width;
        self
    }

    /// Number of simulated trials.
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Sampler seed for the bundled simulator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Candidate strategy used by the period extractor.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn counting_width(&self) -> usize {
        self.counting_width
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Rejects a zero counting width or a zero shot count.
    pub fn validate(&self) -> Result<(), ShorError> {
        if self.counting_width == 0 {
            return Err(ShorError::invalid_input("counting width must be at least 1"));
        }
        if self.counting_width > 63 {
            return Err(ShorError::invalid_input(format!(
                "counting width {} exceeds 63 bits",
                self.counting_width
            )));
        }
        if self.shots == 0 {
            return Err(ShorError::invalid_input("shot count must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ShorConfig::default();
        assert_eq!(config.counting_width(), 8);
        assert_eq!(config.shots(), 1024);
        assert_eq!(config.strategy(), StrategyKind::AdjacentDifferences);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_register_and_zero_shots() {
        assert!(ShorConfig::default().with_counting_width(0).validate().is_err());
        assert!(ShorConfig::default().with_counting_width(64).validate().is_err());
        assert!(ShorConfig::default().with_shots(0).validate().is_err());
    }
}
