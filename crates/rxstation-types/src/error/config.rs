//! Errors from locating, reading, validating and writing `station_config.json`.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Neither the override nor the home directory gave a usable data dir.
    #[error("Data directory unavailable: {message}")]
    DataDirUnavailable { message: String },

    #[error("Cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    /// File exists but is not a valid station config document.
    #[error("Malformed config {path}: {message}")]
    Malformed { path: String, message: String },

    /// A value is out of range; `field` is the dotted config key.
    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Cannot write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl ConfigError {
    pub fn unreadable(path: &Path, e: impl Display) -> Self {
        Self::Unreadable { path: path.display().to_string(), message: e.to_string() }
    }

    pub fn malformed(path: &Path, e: impl Display) -> Self {
        Self::Malformed { path: path.display().to_string(), message: e.to_string() }
    }

    pub fn write_failed(path: &Path, e: impl Display) -> Self {
        Self::WriteFailed { path: path.display().to_string(), message: e.to_string() }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid { field: field.to_string(), message: message.into() }
    }
}
