//! Local station binding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fingerprint::FingerprintHash;

/// Prefix applied to registry ids to form a station code (`RX00-42`).
pub const DEFAULT_STATION_PREFIX: &str = "RX00-";

/// Logical workstation identifier.
///
/// Either the registry's numeric `stationId` rendered in decimal, or a
/// station code built from the registry id of a freshly registered device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Station code for a registry id.
    pub fn from_code(prefix: &str, device_id: i64) -> Self {
        Self(format!("{}{}", prefix, device_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Association between this agent profile and a registered station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StationBinding {
    pub station_id: StationId,
    pub station_name: String,
    pub fingerprint_hash: FingerprintHash,
    pub bound_at: DateTime<Utc>,
}

impl StationBinding {
    /// Create a binding stamped with the current time.
    pub fn new(station_id: StationId, station_name: String, fingerprint_hash: FingerprintHash) -> Self {
        Self { station_id, station_name, fingerprint_hash, bound_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_code() {
        assert_eq!(StationId::from_code(DEFAULT_STATION_PREFIX, 42).as_str(), "RX00-42");
    }

    #[test]
    fn test_binding_uses_camel_case() {
        let hash = FingerprintHash::parse(&"ab".repeat(32)).unwrap();
        let binding = StationBinding::new(StationId::new("3"), "Pharmacy".to_string(), hash);

        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(json["stationId"], "3");
        assert_eq!(json["stationName"], "Pharmacy");
        assert_eq!(json["fingerprintHash"], "ab".repeat(32));
        assert!(json.get("boundAt").is_some());
    }
}
