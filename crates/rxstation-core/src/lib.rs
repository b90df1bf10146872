//! # RxStation Core
//!
//! Fingerprint collection, hashing and station binding for the RxStation
//! agent.
//!
//! ```text
//! rxstation-core/src/
//! ├── fingerprint/      # Environment probes, collector, canonical hash
//! │   ├── host.rs       # native host signals (sysinfo, /sys)
//! │   └── snapshot.rs   # replay of browser-captured signals
//! └── modules/
//!     ├── binding.rs    # local binding store (atomic file / memory)
//!     ├── registry.rs   # DeviceRegistry seam over rxstation-client
//!     ├── station.rs    # StationBinder reconciliation
//!     ├── config.rs     # station_config.json loading
//!     └── logger.rs     # tracing subscriber setup
//! ```

// Test-only lints: allow panic!, float comparisons, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::float_cmp,
        clippy::unwrap_used,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod fingerprint;
pub mod modules;

// Re-export commonly used types
pub use error::{StationError, StationResult};
pub use fingerprint::{
    Environment, FingerprintCollector, HostEnvironment, SignalSnapshot, SnapshotEnvironment,
};
pub use modules::binding::{BindingStore, FileBindingStore, MemoryBindingStore};
pub use modules::registry::DeviceRegistry;
pub use modules::station::{
    BinderSettings, ConfirmedHashUpdate, Fingerprint, HashUpdateProposal, ResolutionOutcome,
    StationBinder, StationResolution, StationState,
};
