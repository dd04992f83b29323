//! Concept Drift Detection Module
//!
//! This module provides the drift detector contract and the DDM
//! implementation for monitoring the error stream of an online classifier.

mod ddm;

pub use ddm::{DdmConfig, DetectorState, DDM};

use serde::{Deserialize, Serialize};

/// Drift detection state of the last observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftState {
    /// No drift detected
    #[default]
    NoDrift,
    /// Warning: possible drift
    Warning,
    /// Drift detected
    Drift,
}

impl DriftState {
    /// Build a state from a `(drift, warning)` flag pair.
    ///
    /// Drift dominates warning.
    pub fn from_flags(in_drift: bool, in_warning: bool) -> Self {
        if in_drift {
            DriftState::Drift
        } else if in_warning {
            DriftState::Warning
        } else {
            DriftState::NoDrift
        }
    }

    pub fn is_drift(self) -> bool {
        self == DriftState::Drift
    }

    pub fn is_warning(self) -> bool {
        self == DriftState::Warning
    }
}

/// Trait for drift detectors
///
/// Detectors consume one observation at a time from a single caller;
/// calls on one instance must be serialized.
pub trait DriftDetector {
    /// Add an observation (1 = prediction error, 0 = correct prediction).
    ///
    /// Returns the `(in_drift, in_warning)` pair for this observation.
    fn add_element(&mut self, observation: f64) -> (bool, bool);

    /// Reset detector state
    fn reset(&mut self);

    /// Whether the last observation was classified as drift
    fn in_concept_change(&self) -> bool;

    /// Whether the last observation was classified as warning
    fn in_warning_zone(&self) -> bool;

    /// Current estimate of the monitored quantity
    fn estimation(&self) -> f64;

    /// Number of observations folded into the current statistics
    fn samples_seen(&self) -> u64;

    /// Classification of the last observation
    fn state(&self) -> DriftState {
        DriftState::from_flags(self.in_concept_change(), self.in_warning_zone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_flags() {
        assert_eq!(DriftState::from_flags(false, false), DriftState::NoDrift);
        assert_eq!(DriftState::from_flags(false, true), DriftState::Warning);
        assert_eq!(DriftState::from_flags(true, false), DriftState::Drift);
        assert_eq!(DriftState::from_flags(true, true), DriftState::Drift);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&DriftState::NoDrift).unwrap();
        assert_eq!(json, "\"no_drift\"");

        let state: DriftState = serde_json::from_str("\"warning\"").unwrap();
        assert!(state.is_warning());
        assert!(!state.is_drift());
    }

    #[test]
    fn test_trait_object_state() {
        let mut detector: Box<dyn DriftDetector> = Box::new(DDM::default());
        detector.add_element(0.0);
        assert_eq!(detector.state(), DriftState::NoDrift);
        assert_eq!(detector.samples_seen(), 1);
    }
}
