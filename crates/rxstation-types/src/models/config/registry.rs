//! Device registry connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for retry behavior on transient registry errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, base_delay_ms: 250, max_delay_ms: 5_000 }
    }
}

/// Device registry endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL of the pharmacy backend (without `/api/...`)
    pub base_url: String,
    /// Bearer token; usually supplied via `RXSTATION_TOKEN` instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Devices requested per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Register through `/auto-register` instead of the collection root
    #[serde(default)]
    pub auto_register: bool,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    100
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            token: None,
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            auto_register: false,
            retry: RetryConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Check URL scheme and numeric bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("registry.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "registry.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("registry.timeout_secs", "must be greater than 0"));
        }
        if !(1..=1000).contains(&self.page_size) {
            return Err(ConfigError::invalid("registry.page_size", "must be within 1..=1000"));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::invalid(
                "registry.retry.base_delay_ms",
                "must not exceed max_delay_ms",
            ));
        }
        Ok(())
    }
}
