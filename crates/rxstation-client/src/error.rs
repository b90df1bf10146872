//! Error types for the registry client.

use rxstation_types::RegistryError;
use thiserror::Error;

/// Errors that can occur when using the registry client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to establish connection to the registry.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request did not complete within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// HTTP request failed for another reason (builder, redirect, body).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Registry returned a body that does not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Registry returned 429 Too Many Requests.
    #[error("Rate limited (429): retry after {retry_after:?}s")]
    RateLimited {
        /// Seconds to wait before retrying, if provided by the registry.
        retry_after: Option<u64>,
    },

    /// Registry returned 404 for a device-scoped call.
    #[error("Device not found: {0}")]
    NotFound(i64),

    /// Registry returned a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Error message from the registry.
        message: String,
    },
}

impl ClientError {
    /// Whether the call is worth repeating.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) | Self::RateLimited { .. } => true,
            Self::ServerError { status, .. } => *status >= 500,
            Self::Request(_) | Self::InvalidResponse(_) | Self::NotFound(_) => false,
        }
    }

    /// Classify a transport error from reqwest.
    pub(crate) fn from_transport(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<&ClientError> for RegistryError {
    fn from(e: &ClientError) -> Self {
        match e {
            ClientError::Connection(message) => Self::Unreachable { message: message.clone() },
            ClientError::Timeout(secs) => Self::Timeout { duration_secs: *secs },
            ClientError::Request(inner) => Self::Unreachable { message: inner.to_string() },
            ClientError::InvalidResponse(message) => {
                Self::InvalidResponse { message: message.clone() }
            },
            ClientError::RateLimited { retry_after } => {
                Self::RateLimited { retry_after_secs: *retry_after }
            },
            ClientError::NotFound(id) => Self::DeviceNotFound { id: *id },
            ClientError::ServerError { status, message } => {
                Self::Rejected { status: *status, message: message.clone() }
            },
        }
    }
}

impl From<ClientError> for RegistryError {
    fn from(e: ClientError) -> Self {
        Self::from(&e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Connection("refused".to_string()).is_transient());
        assert!(ClientError::Timeout(10).is_transient());
        assert!(ClientError::RateLimited { retry_after: None }.is_transient());
        assert!(ClientError::ServerError { status: 502, message: String::new() }.is_transient());
        assert!(!ClientError::ServerError { status: 400, message: String::new() }.is_transient());
        assert!(!ClientError::NotFound(3).is_transient());
    }

    #[test]
    fn test_registry_error_conversion() {
        let err = RegistryError::from(ClientError::ServerError {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(err, RegistryError::Rejected { status: 503, message: "maintenance".to_string() });
        assert!(err.is_transient());
    }
}
