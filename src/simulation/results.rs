// src/simulation/results.rs
use crate::core::ShorError;
use std::collections::BTreeMap;
use std::fmt;

/// Observed measurement frequencies of the counting register.
///
/// Keys are bitstrings of exactly `width` characters, most significant bit
/// first, so counting qubit 0 is the rightmost character. Only observed
/// outcomes (frequency > 0) are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDistribution {
    width: usize,
    counts: BTreeMap<String, u64>,
}

/// One bar of the phase histogram: a measured value as a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePeak {
    /// Integer value of the measured bitstring.
    pub value: u64,
    /// `value / 2^width`, in `[0, 1)`.
    pub phase: f64,
    /// Observed frequency divided by the total shot count.
    pub probability: f64,
}

impl OutcomeDistribution {
    /// Builds a distribution from `(bitstring, frequency)` pairs.
    /// Repeated bitstrings are merged and zero frequencies dropped.
    ///
    /// # Errors
    /// `ShorError::InvalidDistribution` if `width` is 0 or above 63, or a
    /// bitstring has the wrong length or a character other than `0`/`1`.
    pub fn from_counts<I>(width: usize, counts: I) -> Result<Self, ShorError>
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        check_width(width)?;
        let mut merged = BTreeMap::new();
        for (bitstring, frequency) in counts {
            if bitstring.len() != width || !bitstring.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(ShorError::InvalidDistribution {
                    message: format!("'{}' is not a {}-bit bitstring", bitstring, width),
                });
            }
            if frequency > 0 {
                *merged.entry(bitstring).or_insert(0) += frequency;
            }
        }
        Ok(Self { width, counts: merged })
    }

    /// Builds a distribution from `(register value, frequency)` pairs.
    ///
    /// # Errors
    /// `ShorError::InvalidDistribution` if `width` is out of range or a value
    /// does not fit in `width` bits.
    pub fn from_values<I>(width: usize, values: I) -> Result<Self, ShorError>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        check_width(width)?;
        let mut merged = BTreeMap::new();
        for (value, frequency) in values {
            if value >> width != 0 {
                return Err(ShorError::InvalidDistribution {
                    message: format!("value {} does not fit in {} bits", value, width),
                });
            }
            if frequency > 0 {
                *merged.entry(format!("{:0width$b}", value, width = width)).or_insert(0) += frequency;
            }
        }
        Ok(Self { width, counts: merged })
    }

    /// Length of every bitstring (the counting register width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// All observed bitstrings with their frequencies, in ascending numeric order.
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Number of distinct observed outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Frequency of `bitstring`, 0 if it was never observed.
    pub fn frequency(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Integer value of every observed bitstring, ascending.
    pub fn values(&self) -> Vec<u64> {
        // Equal-width binary strings sort lexicographically in numeric order.
        self.counts.keys().filter_map(|k| u64::from_str_radix(k, 2).ok()).collect()
    }

    /// `(value, frequency)` pairs, most frequent first; ties by ascending value.
    pub fn by_frequency(&self) -> Vec<(u64, u64)> {
        let mut pairs: Vec<(u64, u64)> = self
            .counts
            .iter()
            .filter_map(|(k, f)| u64::from_str_radix(k, 2).ok().map(|v| (v, *f)))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs
    }

    /// Observed relative frequency of each bitstring.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.counts
            .iter()
            .map(|(k, f)| (k.clone(), *f as f64 / total as f64))
            .collect()
    }

    /// The measured phases `value / 2^width` with their probabilities, sorted by phase.
    pub fn phase_peaks(&self) -> Vec<PhasePeak> {
        let total = self.shots();
        if total == 0 {
            return Vec::new();
        }
        let scale = (1u64 << self.width) as f64;
        self.counts
            .iter()
            .filter_map(|(k, f)| {
                u64::from_str_radix(k, 2).ok().map(|value| PhasePeak {
                    value,
                    phase: value as f64 / scale,
                    probability: *f as f64 / total as f64,
                })
            })
            .collect()
    }
}

fn check_width(width: usize) -> Result<(), ShorError> {
    if width == 0 || width > 63 {
        return Err(ShorError::InvalidDistribution {
            message: format!("bitstring width must be in 1..=63, got {}", width),
        });
    }
    Ok(())
}

impl fmt::Display for OutcomeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome Distribution ({} bits, {} shots):", self.width, self.shots())?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        } else {
            for peak in self.phase_peaks() {
                writeln!(
                    f,
                    "  {:0width$b}  phase {:.4}  p={:.4}",
                    peak.value,
                    peak.phase,
                    peak.probability,
                    width = self.width
                )?;
            }
        }
        Ok(())
    }
}
