//! Unified error types for RxStation Core.

use rxstation_types::{BindingError, ConfigError, RegistryError};
use serde::Serialize;
use thiserror::Error;

/// Main error type for station operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StationError {
    /// Registry failed while resolving the station at start-up.
    #[error("Station initialization failed: {0}")]
    Initialization(RegistryError),

    /// Registry failed during an administrative operation.
    #[error("Registry error: {0}")]
    Registry(RegistryError),

    /// No registered device has the requested id.
    #[error("Device not found: {0}")]
    DeviceNotFound(i64),

    /// Local binding could not be read or written.
    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A newer resolution superseded this one.
    #[error("Station resolution cancelled")]
    Cancelled,

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StationError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Initialization(e) | Self::Registry(e) => e.is_transient(),
            Self::Cancelled => true,
            _ => false,
        }
    }
}

impl Serialize for StationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for station operations.
pub type StationResult<T> = Result<T, StationError>;
