//! Serializable error hierarchy shared by the client, core and CLI.
//!
//! Each domain error carries plain strings and numbers only, so it can be
//! cloned into a [`TypedError`], compared in tests and emitted as JSON by
//! `--json` commands.

mod binding;
mod config;
mod registry;

pub use binding::BindingError;
pub use config::ConfigError;
pub use registry::RegistryError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any RxStation domain error, tagged by the layer it came from.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl TypedError {
    /// Only registry failures can clear up by themselves.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Registry(e) => e.is_transient(),
            Self::Config(_) | Self::Binding(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_json_shape() {
        let err: TypedError = RegistryError::DeviceNotFound { id: 42 }.into();

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["domain"], "Registry");
        assert_eq!(json["error"]["type"], "DeviceNotFound");
        assert_eq!(json["error"]["details"]["id"], 42);

        let back: TypedError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_transient_follows_registry_status() {
        let server = TypedError::from(RegistryError::Rejected {
            status: 503,
            message: "maintenance".to_string(),
        });
        let forbidden = TypedError::from(RegistryError::Rejected {
            status: 403,
            message: "forbidden".to_string(),
        });
        let config = TypedError::from(ConfigError::invalid("registry.page_size", "too large"));

        assert!(server.is_transient());
        assert!(!forbidden.is_transient());
        assert!(!config.is_transient());
    }

    #[test]
    fn test_config_error_names_the_file() {
        let err = ConfigError::malformed(
            std::path::Path::new("/data/station_config.json"),
            "expected value at line 1",
        );
        assert_eq!(
            err.to_string(),
            "Malformed config /data/station_config.json: expected value at line 1"
        );
    }
}
