//! DDM (Drift Detection Method)
//!
//! DDM monitors the error rate of a classifier and signals drift when
//! the error rate significantly increases.
//!
//! The error stream is modelled as a sequence of Bernoulli trials. For every
//! observation the detector keeps the running error rate `p` and its standard
//! deviation `s = sqrt(p * (1 - p) / n)`, and remembers the pair
//! `(p_min, s_min)` observed when `p + s` was lowest. Then:
//!
//! * `p + s > p_min + warning_level * s_min` -> warning zone
//! * `p + s > p_min + out_control_level * s_min` -> drift
//!
//! After a drift the statistics restart from the following observation.
//!
//! Reference:
//! Gama, J., Medas, P., Castillo, G. and Rodrigues, P., 2004.
//! Learning with drift detection. In Brazilian symposium on artificial intelligence (pp. 286-295).

use super::{DriftDetector, DriftState};
use crate::error::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// DDM configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdmConfig {
    /// Minimum number of analysed samples before change can be detected
    pub min_num_instances: u64,
    /// Warning level multiplier
    pub warning_level: f64,
    /// Out-of-control (drift) level multiplier
    pub out_control_level: f64,
}

impl Default for DdmConfig {
    fn default() -> Self {
        Self {
            min_num_instances: 30,
            warning_level: 2.0,
            out_control_level: 3.0,
        }
    }
}

impl DdmConfig {
    /// Set minimum number of instances (default: 30)
    pub fn with_min_num_instances(mut self, min_num_instances: u64) -> Self {
        self.min_num_instances = min_num_instances;
        self
    }

    /// Set warning level (default: 2.0)
    pub fn with_warning_level(mut self, level: f64) -> Self {
        self.warning_level = level;
        self
    }

    /// Set out-of-control level (default: 3.0)
    pub fn with_out_control_level(mut self, level: f64) -> Self {
        self.out_control_level = level;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_num_instances == 0 {
            return Err(DriftError::InvalidConfig(
                "min_num_instances must be at least 1".to_string(),
            ));
        }
        if !self.warning_level.is_finite() || self.warning_level <= 0.0 {
            return Err(DriftError::InvalidConfig(format!(
                "warning_level must be positive, got {}",
                self.warning_level
            )));
        }
        if !self.out_control_level.is_finite() || self.out_control_level <= self.warning_level {
            return Err(DriftError::InvalidConfig(format!(
                "out_control_level must exceed warning_level ({}), got {}",
                self.warning_level, self.out_control_level
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DdmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Running statistics of a DDM detector
///
/// `min_*` values are a coupled snapshot taken when `min_sum` was last
/// lowered, not independent minima.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectorState {
    /// Observations since the last reset, plus one
    pub sample_count: u64,
    /// Running mean of the observations
    pub error_rate: f64,
    /// Standard deviation of the error rate estimator
    pub error_std: f64,
    /// Lowest `error_rate + error_std` seen
    pub min_sum: f64,
    /// Error rate at `min_sum`
    pub min_error_rate: f64,
    /// Standard deviation at `min_sum`
    pub min_std: f64,
}

impl Default for DetectorState {
    fn default() -> Self {
        Self {
            sample_count: 1,
            error_rate: 1.0,
            error_std: 0.0,
            min_sum: f64::INFINITY,
            min_error_rate: f64::INFINITY,
            min_std: f64::INFINITY,
        }
    }
}

/// DDM Drift Detector
///
/// Detects drift based on the error rate of predictions.
///
/// # Preconditions
///
/// Observations are expected to be `0.0` (correct prediction) or `1.0`
/// (error). Other values are neither rejected nor clamped; the resulting
/// statistics are unspecified.
///
/// # Example
///
/// ```
/// use concept_drift::drift::{DriftDetector, DDM};
///
/// let mut ddm = DDM::default();
/// for _ in 0..100 {
///     ddm.add_element(0.0);
/// }
/// let (in_drift, in_warning) = ddm.add_element(1.0);
/// assert!(in_drift);
/// assert!(!in_warning);
/// ```
#[derive(Debug, Clone)]
pub struct DDM {
    config: DdmConfig,
    state: DetectorState,
    in_concept_change: bool,
    in_warning_zone: bool,
    /// Set when the last observation was a drift; consumed by the next one
    pending_reset: bool,
}

impl Default for DDM {
    fn default() -> Self {
        Self::with_valid_config(DdmConfig::default())
    }
}

impl DDM {
    /// Create a new DDM detector
    pub fn new(config: DdmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: DdmConfig) -> Self {
        Self {
            config,
            state: DetectorState::default(),
            in_concept_change: false,
            in_warning_zone: false,
            pending_reset: false,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &DdmConfig {
        &self.config
    }

    /// Snapshot of the running statistics
    pub fn statistics(&self) -> DetectorState {
        self.state
    }

    pub fn sample_count(&self) -> u64 {
        self.state.sample_count
    }

    /// Get current error rate estimate
    pub fn error_rate(&self) -> f64 {
        self.state.error_rate
    }

    pub fn error_std(&self) -> f64 {
        self.state.error_std
    }

    /// Compare `p + s` against the thresholds built from the minimum snapshot.
    fn classify(&self, sum: f64) -> DriftState {
        let state = &self.state;
        if sum > state.min_error_rate + self.config.out_control_level * state.min_std {
            DriftState::Drift
        } else if sum > state.min_error_rate + self.config.warning_level * state.min_std {
            DriftState::Warning
        } else {
            DriftState::NoDrift
        }
    }
}

impl DriftDetector for DDM {
    fn add_element(&mut self, observation: f64) -> (bool, bool) {
        if self.pending_reset {
            trace!(
                samples = self.samples_seen(),
                "restarting statistics after drift"
            );
            self.reset();
        }

        // Both statistics use the count before it is incremented
        let state = &mut self.state;
        let n = state.sample_count as f64;
        state.error_rate += (observation - state.error_rate) / n;
        state.error_std = (state.error_rate * (1.0 - state.error_rate) / n).sqrt();
        state.sample_count += 1;

        self.in_concept_change = false;
        self.in_warning_zone = false;

        if self.state.sample_count < self.config.min_num_instances {
            return (false, false);
        }

        let sum = self.state.error_rate + self.state.error_std;
        if sum <= self.state.min_sum {
            self.state.min_error_rate = self.state.error_rate;
            self.state.min_std = self.state.error_std;
            self.state.min_sum = sum;
        }

        match self.classify(sum) {
            DriftState::Drift => {
                self.in_concept_change = true;
                self.pending_reset = true;
            }
            DriftState::Warning => self.in_warning_zone = true,
            DriftState::NoDrift => {}
        }

        (self.in_concept_change, self.in_warning_zone)
    }

    fn reset(&mut self) {
        self.state = DetectorState::default();
        self.in_concept_change = false;
        self.in_warning_zone = false;
        self.pending_reset = false;
    }

    fn in_concept_change(&self) -> bool {
        self.in_concept_change
    }

    fn in_warning_zone(&self) -> bool {
        self.in_warning_zone
    }

    fn estimation(&self) -> f64 {
        self.state.error_rate
    }

    fn samples_seen(&self) -> u64 {
        self.state.sample_count - 1
    }
}
