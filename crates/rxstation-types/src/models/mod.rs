//! Core domain models for RxStation.
//!
//! This module contains all shared data structures used across the workspace.

mod binding;
pub mod config;
mod device;
mod fingerprint;

// Re-export all models
pub use binding::{StationBinding, StationId, DEFAULT_STATION_PREFIX};
pub use config::{
    FingerprintConfig, HashScope, RegistryConfig, RetryConfig, StationConfig, StationProfileConfig,
};
pub use device::{Device, DeviceHashUpdate, DevicePage, NewDevice};
pub use fingerprint::{
    BatteryStatus, FingerprintHash, FingerprintRecord, MediaDeviceInfo, StableSignals, UNAVAILABLE,
};
