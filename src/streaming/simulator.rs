//! Stream Simulator
//!
//! Seeded generators of binary error streams for exercising drift detectors.

use crate::error::{DriftError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_mt::Mt;
use std::ops::Range;

/// Uniform bit stream drawn from a 32-bit Mersenne Twister
///
/// Each observation is the lowest bit of the next MT19937 output, which is
/// how NumPy's legacy `randint(2)` draws. Selected index ranges can be forced
/// to 1 to simulate an error-rate spike.
#[derive(Debug, Clone)]
pub struct MersenneBitStream {
    rng: Mt,
    length: usize,
    position: usize,
    forced_errors: Vec<Range<usize>>,
}

impl MersenneBitStream {
    /// Create a stream of `length` bits from `seed`
    pub fn new(seed: u32, length: usize) -> Self {
        Self {
            rng: Mt::new(seed),
            length,
            position: 0,
            forced_errors: Vec::new(),
        }
    }

    /// Stream with seed 12345, 2000 bits and indices `[999, 1500)` forced to 1
    pub fn reference() -> Self {
        Self::new(12345, 2000).with_forced_errors(999..1500)
    }

    /// Force every index in `range` to be an error.
    ///
    /// The generator still advances on forced indices, so the bits outside
    /// the range do not depend on which ranges are forced.
    pub fn with_forced_errors(mut self, range: Range<usize>) -> Self {
        self.forced_errors.push(range);
        self
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining observations
    pub fn remaining(&self) -> usize {
        self.length - self.position
    }
}

impl Iterator for MersenneBitStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.position >= self.length {
            return None;
        }

        let bit = self.rng.next_u32() & 1;
        let forced = self
            .forced_errors
            .iter()
            .any(|range| range.contains(&self.position));
        self.position += 1;

        Some(if forced { 1.0 } else { f64::from(bit) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MersenneBitStream {}

/// Stationary segment of a regime stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regime {
    /// Probability that an observation is an error
    pub error_rate: f64,
    /// Number of observations in the segment
    pub length: usize,
}

impl Regime {
    pub fn new(error_rate: f64, length: usize) -> Self {
        Self { error_rate, length }
    }
}

/// Piecewise-stationary Bernoulli error stream
///
/// Concatenates regimes with their own error rate, so abrupt drifts happen
/// at known indices.
#[derive(Debug, Clone)]
pub struct RegimeStream {
    rng: StdRng,
    regimes: Vec<Regime>,
    /// Index of the current regime
    current: usize,
    /// Position within the current regime
    offset: usize,
    position: usize,
    total: usize,
}

impl RegimeStream {
    /// Create a new regime stream
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the random generator
    /// * `regimes` - Segments in stream order
    pub fn new(seed: u64, regimes: Vec<Regime>) -> Result<Self> {
        if regimes.is_empty() {
            return Err(DriftError::InvalidStream(
                "at least one regime is required".to_string(),
            ));
        }
        if let Some(bad) = regimes
            .iter()
            .find(|r| !(0.0..=1.0).contains(&r.error_rate))
        {
            return Err(DriftError::InvalidStream(format!(
                "error rate must be in [0, 1], got {}",
                bad.error_rate
            )));
        }

        let total = regimes
            .iter()
            .try_fold(0usize, |total, r| total.checked_add(r.length))
            .ok_or_else(|| {
                DriftError::InvalidStream("total stream length overflows".to_string())
            })?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            regimes,
            current: 0,
            offset: 0,
            position: 0,
            total,
        })
    }

    /// Indices where a new regime starts (excluding the first)
    pub fn change_points(&self) -> Vec<usize> {
        self.regimes
            .iter()
            .scan(0, |start, regime| {
                *start += regime.length;
                Some(*start)
            })
            .take(self.regimes.len().saturating_sub(1))
            .collect()
    }

    /// Get total number of observations
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining observations
    pub fn remaining(&self) -> usize {
        self.total - self.position
    }
}

impl Iterator for RegimeStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        // Skip exhausted (or empty) regimes
        while self.current < self.regimes.len()
            && self.offset >= self.regimes[self.current].length
        {
            self.current += 1;
            self.offset = 0;
        }
        let regime = self.regimes.get(self.current)?;

        let error = self.rng.gen_bool(regime.error_rate);
        self.offset += 1;
        self.position += 1;

        Some(if error { 1.0 } else { 0.0 })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RegimeStream {}
