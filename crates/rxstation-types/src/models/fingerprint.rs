//! Fingerprint record and digest types.
//!
//! A [`FingerprintRecord`] is a flat snapshot of device/runtime signals taken
//! at one point in time. It is hashed into a [`FingerprintHash`] and then
//! thrown away; only the hash is ever stored.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::error::BindingError;

/// Sentinel for string signals whose probe was unsupported or failed.
pub const UNAVAILABLE: &str = "unavailable";

/// Battery snapshot as reported by the battery status API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStatus {
    /// Charge level in `0.0..=1.0`
    pub level: f64,
    /// Whether the device is plugged in
    pub charging: bool,
    /// Seconds until full, `None` when unknown/infinite
    pub charging_time: Option<f64>,
    /// Seconds until empty, `None` when unknown/infinite
    pub discharging_time: Option<f64>,
}

/// One enumerated media input/output device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaDeviceInfo {
    /// `audioinput`, `audiooutput` or `videoinput`
    pub kind: String,
    /// Human readable label (empty without media permission)
    pub label: String,
}

/// Flat mapping of signal name to value.
///
/// Every field is always present. Probes that are unsupported or fail
/// leave the sentinel for their type: [`UNAVAILABLE`] for strings, `None`
/// for numbers, an empty list for lists and `false` for capability flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRecord {
    pub user_agent: String,
    pub platform: String,
    pub language: String,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub max_touch_points: Option<u32>,
    /// `"WxH"`
    pub screen_resolution: String,
    pub color_depth: Option<u32>,
    pub pixel_depth: Option<u32>,
    /// IANA zone name
    pub timezone: String,
    /// Minutes west of UTC (browser `getTimezoneOffset` convention)
    pub timezone_offset: Option<i32>,

    /// Data URI of the rendered canvas probe
    pub canvas: String,
    /// `vendor~renderer`, or a WebGL sentinel
    pub webgl: String,

    pub fonts: Vec<String>,
    pub plugins: Vec<String>,
    pub local_storage: bool,
    pub session_storage: bool,
    pub indexed_db: bool,
    pub open_database: bool,
    pub do_not_track: String,
    pub cookies_enabled: bool,
    pub vibration: bool,
    pub battery: Option<BatteryStatus>,
    pub media_devices: Vec<MediaDeviceInfo>,
    pub screen_brightness: Option<f64>,
    pub vendor_prefix: String,
    pub cookie_store: bool,
    pub bluetooth: bool,
    pub usb: bool,
    pub serial: bool,
}

/// Subset of a record that does not drift between sessions on the same device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StableSignals<'a> {
    pub hardware_concurrency: Option<u32>,
    pub screen_resolution: &'a str,
    pub timezone: &'a str,
    pub platform: &'a str,
    pub webgl: &'a str,
    pub fonts: &'a [String],
}

impl FingerprintRecord {
    /// Borrow the stable signal subset.
    pub fn stable_signals(&self) -> StableSignals<'_> {
        StableSignals {
            hardware_concurrency: self.hardware_concurrency,
            screen_resolution: &self.screen_resolution,
            timezone: &self.timezone,
            platform: &self.platform,
            webgl: &self.webgl,
            fonts: &self.fonts,
        }
    }
}

/// SHA-256 digest of a canonical fingerprint record, as 64 lowercase hex chars.
///
/// This is the only canonical form: a JSON-quoted hash (`"\"ab..\""`) is
/// rejected by [`FingerprintHash::parse`] rather than unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FingerprintHash(String);

impl FingerprintHash {
    /// Hex digits in a SHA-256 digest.
    pub const LEN: usize = 64;

    /// Validate and normalise a hex digest.
    pub fn parse(value: &str) -> Result<Self, BindingError> {
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(BindingError::InvalidHash { value: value.to_string() })
        }
    }

    /// Hex-encode a raw SHA-256 digest.
    pub fn from_sha256(digest: [u8; 32]) -> Self {
        let mut hex = String::with_capacity(Self::LEN);
        for byte in digest {
            let _ = write!(hex, "{:02x}", byte);
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` characters, for log lines and tables.
    pub fn short(&self, n: usize) -> &str {
        &self.0[..n.min(Self::LEN)]
    }
}

impl TryFrom<String> for FingerprintHash {
    type Error = BindingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FingerprintHash> for String {
    fn from(hash: FingerprintHash) -> Self {
        hash.0
    }
}

impl fmt::Display for FingerprintHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
