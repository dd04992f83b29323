//! Concept Drift Detection for Online Learning
//!
//! This library watches the error stream of an online classifier and
//! reports when its error rate has risen significantly, so the model can be
//! retrained or replaced.
//!
//! # Modules
//!
//! - `drift` - Drift detector contract and the DDM (Drift Detection Method)
//! - `streaming` - Synthetic error streams and an observation reader
//! - `monitor` - Event log and counters around a detector
//! - `error` - Error types
//!
//! # Example
//!
//! ```rust
//! use concept_drift::drift::{DriftDetector, DDM};
//! use concept_drift::streaming::MersenneBitStream;
//!
//! let mut ddm = DDM::default();
//! let mut first_drift = None;
//!
//! for (i, observation) in MersenneBitStream::reference().enumerate() {
//!     let (in_drift, _in_warning) = ddm.add_element(observation);
//!     if in_drift && first_drift.is_none() {
//!         first_drift = Some(i);
//!     }
//! }
//!
//! assert_eq!(first_drift, Some(1077));
//! ```

pub mod drift;
pub mod error;
pub mod monitor;
pub mod streaming;

// Re-export commonly used types
pub use drift::{DdmConfig, DetectorState, DriftDetector, DriftState, DDM};
pub use error::{DriftError, Result};
pub use monitor::{DriftEvent, DriftMonitor, MonitorSummary};
pub use streaming::{MersenneBitStream, Regime, RegimeStream};
