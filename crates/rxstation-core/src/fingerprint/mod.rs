//! Device fingerprinting: signal probes, collection and hashing.

pub mod canvas;
mod collector;
mod environment;
pub mod fonts;
pub mod hash;
mod host;
mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use canvas::{CanvasScript, DrawOp, CANVAS_PROBE_TEXT};
pub use collector::{FingerprintCollector, WEBGL_ERROR, WEBGL_NO_CONTEXT, WEBGL_NO_DEBUG_INFO};
pub use environment::{
    Environment, ProbeError, ProbeResult, ScreenInfo, StorageArea, WebApi, WebGlInfo,
};
pub use hash::{canonical_json, hash_record};
pub use host::HostEnvironment;
pub use snapshot::{SignalSnapshot, SnapshotEnvironment, WebGlSnapshot};
