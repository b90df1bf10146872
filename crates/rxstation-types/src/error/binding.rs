//! Local station binding errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the local binding store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum BindingError {
    /// Binding file could not be read or written
    #[error("Binding storage error: {message}")]
    StorageError {
        /// Description of the storage failure
        message: String,
    },

    /// Binding file exists but does not contain a valid binding
    #[error("Binding file is corrupt: {message}")]
    Corrupt {
        /// Description of the decode failure
        message: String,
    },

    /// Fingerprint hash value is not 64 hex characters
    #[error("Invalid fingerprint hash: {value:?}")]
    InvalidHash {
        /// Offending value as read
        value: String,
    },
}

impl BindingError {
    /// Create a storage error from an IO error.
    pub fn from_io_error(e: &std::io::Error) -> Self {
        Self::StorageError { message: e.to_string() }
    }
}
