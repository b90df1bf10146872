//! # RxStation Types
//!
//! Core types, models, and error definitions for RxStation.
//!
//! This crate provides the foundational type system for the station agent:
//!
//! - **`error`** - Typed error hierarchy for configuration, binding storage and the registry
//! - **`models`** - Domain models (FingerprintRecord, Device, StationBinding, StationConfig)
//!
//! ## Architecture Role
//!
//! `rxstation-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!                 rxstation-types (this crate)
//!                         │
//!            ┌────────────┴────────────┐
//!            ▼                         ▼
//!     rxstation-client          rxstation-core
//!            │                         │
//!            └────────────┬────────────┘
//!                         ▼
//!                   rxstation-cli
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for the registry API and the local binding file
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{BindingError, ConfigError, RegistryError, Result, TypedError};

// Re-export core model types
pub use models::{
    BatteryStatus, Device, DeviceHashUpdate, DevicePage, FingerprintHash, FingerprintRecord,
    HashScope, MediaDeviceInfo, NewDevice, StationBinding, StationConfig, StationId,
};
