//! Drift monitoring for online classifiers
//!
//! Wraps a drift detector, turns prediction outcomes into error
//! observations and keeps a log of drift and warning events.

use crate::drift::{DriftDetector, DriftState, DDM};
use serde::Serialize;
use tracing::{debug, info};

/// A drift or warning signalled by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriftEvent {
    /// Zero-based index of the observation in the monitored stream
    pub index: u64,
    pub state: DriftState,
    /// Detector estimate after the observation
    pub estimation: f64,
}

/// Aggregate counts for a monitored stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorSummary {
    pub observations: u64,
    pub drifts: u64,
    /// Observations classified as warning
    pub warnings: u64,
    pub first_drift: Option<u64>,
}

/// Feeds a stream of outcomes to a drift detector
///
/// A warning event is recorded only for the first observation of each
/// contiguous warning run; every drift is recorded.
#[derive(Debug, Clone)]
pub struct DriftMonitor<D: DriftDetector = DDM> {
    detector: D,
    summary: MonitorSummary,
    events: Vec<DriftEvent>,
    last_state: DriftState,
}

impl Default for DriftMonitor<DDM> {
    fn default() -> Self {
        Self::new(DDM::default())
    }
}

impl<D: DriftDetector> DriftMonitor<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            summary: MonitorSummary::default(),
            events: Vec::new(),
            last_state: DriftState::NoDrift,
        }
    }

    /// Feed one error observation (1 = error, 0 = correct)
    pub fn observe(&mut self, observation: f64) -> DriftState {
        let index = self.summary.observations;
        let (in_drift, in_warning) = self.detector.add_element(observation);
        let state = DriftState::from_flags(in_drift, in_warning);
        self.summary.observations += 1;

        match state {
            DriftState::Drift => {
                self.summary.drifts += 1;
                self.summary.first_drift.get_or_insert(index);
                info!(
                    index,
                    error_rate = self.detector.estimation(),
                    "concept drift detected"
                );
                self.push_event(index, state);
            }
            DriftState::Warning => {
                self.summary.warnings += 1;
                if self.last_state != DriftState::Warning {
                    debug!(
                        index,
                        error_rate = self.detector.estimation(),
                        "entered warning zone"
                    );
                    self.push_event(index, state);
                }
            }
            DriftState::NoDrift => {}
        }

        self.last_state = state;
        state
    }

    /// Record a prediction against its true label
    pub fn record_prediction<T: PartialEq + ?Sized>(
        &mut self,
        predicted: &T,
        actual: &T,
    ) -> DriftState {
        let observation = if predicted == actual { 0.0 } else { 1.0 };
        self.observe(observation)
    }

    /// Feed every observation of a stream, returning the final state
    pub fn observe_all<I>(&mut self, observations: I) -> DriftState
    where
        I: IntoIterator<Item = f64>,
    {
        for observation in observations {
            self.observe(observation);
        }
        self.last_state
    }

    fn push_event(&mut self, index: u64, state: DriftState) {
        self.events.push(DriftEvent {
            index,
            state,
            estimation: self.detector.estimation(),
        });
    }

    pub fn events(&self) -> &[DriftEvent] {
        &self.events
    }

    /// Indices of all drift events
    pub fn drift_indices(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter(|e| e.state.is_drift())
            .map(|e| e.index)
            .collect()
    }

    pub fn summary(&self) -> MonitorSummary {
        self.summary
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Reset the detector and clear the event log
    pub fn reset(&mut self) {
        self.detector.reset();
        self.summary = MonitorSummary::default();
        self.events.clear();
        self.last_state = DriftState::NoDrift;
    }
}
