//! Error types for Vitals
//!
//! Only conditions outside the engine's control surface as errors: a failed
//! upstream lookup or invalid construction input. Everything else (missing
//! thresholds, unbalanced field data, absent interaction values) degrades to
//! a documented placeholder and a log line.

use thiserror::Error;

/// Result type alias for Vitals operations
pub type Result<T> = std::result::Result<T, VitalsError>;

/// Main error type for Vitals operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VitalsError {
    /// Local metrics lookup failed
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// User preferences could not be read
    #[error("Preference error: {0}")]
    Preference(String),

    /// Threshold pair is not ordered or not finite
    #[error("Invalid thresholds: good {good} must be below poor {poor}")]
    InvalidThresholds { good: f64, poor: f64 },

    /// Identifier does not name a metric variant
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}

/// Errors from the host storage collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Nothing stored under the page key
    #[error("Storage empty for key {key}")]
    StorageEmpty { key: String },

    /// The active tab has no URL to derive a key from
    #[error("Tab {tab_id} has no URL")]
    MissingUrl { tab_id: u64 },

    /// The storage backend itself failed
    #[error("Storage backend failed: {0}")]
    Backend(String),
}
