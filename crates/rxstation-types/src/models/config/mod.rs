//! Station agent configuration models.

mod app;
mod fingerprint;
mod registry;

pub use app::{StationConfig, StationProfileConfig};
pub use fingerprint::{FingerprintConfig, HashScope, DEFAULT_CANDIDATE_FONTS};
pub use registry::{RegistryConfig, RetryConfig};
