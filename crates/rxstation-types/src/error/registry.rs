//! Device registry errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the device registry.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RegistryError {
    /// Registry could not be reached (DNS, connect, TLS, reset)
    #[error("Registry unreachable: {message}")]
    Unreachable {
        /// Description of the transport failure
        message: String,
    },

    /// Registry answered with a non-2xx status
    #[error("Registry rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Registry answered 429
    #[error("Registry rate limited{}", retry_after_secs.map(|s| format!(", retry after {}s", s)).unwrap_or_default())]
    RateLimited {
        /// Seconds to wait, when the registry provided them
        retry_after_secs: Option<u64>,
    },

    /// Request did not complete in time
    #[error("Registry request timed out after {duration_secs}s")]
    Timeout {
        /// Configured per-request timeout
        duration_secs: u64,
    },

    /// Registry answered 2xx with a body that does not decode
    #[error("Invalid registry response: {message}")]
    InvalidResponse {
        /// Decode failure details
        message: String,
    },

    /// Device with the given id does not exist
    #[error("Device not found: {id}")]
    DeviceNotFound {
        /// Registry id of the missing device
        id: i64,
    },
}

impl RegistryError {
    /// Check if this is a temporary error that may resolve on retry.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable { .. } | Self::RateLimited { .. } | Self::Timeout { .. } => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::InvalidResponse { .. } | Self::DeviceNotFound { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient() {
        let transient = RegistryError::Rejected { status: 503, message: "busy".to_string() };
        let permanent = RegistryError::Rejected { status: 401, message: "denied".to_string() };

        assert!(transient.is_transient());
        assert!(!permanent.is_transient());
        assert!(RegistryError::Timeout { duration_secs: 5 }.is_transient());
        assert!(!RegistryError::DeviceNotFound { id: 4 }.is_transient());
    }

    #[test]
    fn test_rate_limited_display() {
        let err = RegistryError::RateLimited { retry_after_secs: Some(30) };
        assert!(err.to_string().contains("retry after 30s"));

        let err = RegistryError::RateLimited { retry_after_secs: None };
        assert_eq!(err.to_string(), "Registry rate limited");
    }
}
