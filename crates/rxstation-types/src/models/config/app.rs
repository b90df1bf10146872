//! Top-level agent configuration.

use serde::{Deserialize, Serialize};

use super::fingerprint::FingerprintConfig;
use super::registry::RegistryConfig;
use crate::error::ConfigError;
use crate::models::binding::DEFAULT_STATION_PREFIX;

/// Defaults applied when registering a new station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationProfileConfig {
    /// Station code prefix (`RX00-`)
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_department")]
    pub default_department: String,
    /// Falls back to the host name when unset
    #[serde(default)]
    pub default_location: Option<String>,
}

fn default_prefix() -> String {
    DEFAULT_STATION_PREFIX.to_string()
}

fn default_department() -> String {
    "Pharmacy".to_string()
}

impl Default for StationProfileConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            default_department: default_department(),
            default_location: None,
        }
    }
}

/// Full agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub station: StationProfileConfig,
    #[serde(default)]
    pub fingerprint: FingerprintConfig,
    /// Default tracing filter (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write daily-rolling log files under `<data_dir>/logs`
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl StationConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self {
            registry: RegistryConfig::default(),
            station: StationProfileConfig::default(),
            fingerprint: FingerprintConfig::default(),
            log_level: default_log_level(),
            log_to_file: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        if self.station.prefix.trim().is_empty() {
            return Err(ConfigError::invalid("station.prefix", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::new()
    }
}
