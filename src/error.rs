//! Error types for the concept drift library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, DriftError>;

/// Main error type for the library
///
/// Feeding observations into a detector never fails; errors only arise
/// while building detectors and streams or reading observations.
#[derive(Error, Debug)]
pub enum DriftError {
    /// Detector configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Stream generator parameters rejected at construction
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    /// Malformed observation in an input source
    #[error("Failed to parse observation on line {line}: {value:?}")]
    Parse { line: usize, value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DriftError {
    /// Check if the error comes from caller-supplied parameters
    /// rather than from an input source
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DriftError::InvalidConfig(_) | DriftError::InvalidStream(_)
        )
    }
}
