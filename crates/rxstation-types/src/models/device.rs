//! Device registry payloads.
//!
//! The registry owns [`Device`]; the agent only ever submits [`NewDevice`]
//! and [`DeviceHashUpdate`].

use serde::{Deserialize, Serialize};

use super::binding::StationId;
use super::fingerprint::FingerprintHash;

/// Registered device as returned by the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    #[serde(default)]
    pub station_id: Option<i64>,
    #[serde(default)]
    pub fingerprint_hash: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub browser_user_agent: Option<String>,
    #[serde(default)]
    pub screen_resolution: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub access_count: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Device {
    /// Station id this device is known by.
    ///
    /// Falls back to the station code when the registry has not assigned a
    /// numeric station id.
    pub fn resolved_station_id(&self, prefix: &str) -> StationId {
        match self.station_id {
            Some(station) => StationId::new(station.to_string()),
            None => StationId::from_code(prefix, self.id),
        }
    }

    /// Whether `station` names this device, by station id or station code.
    pub fn answers_to(&self, station: &StationId, prefix: &str) -> bool {
        self.station_id.is_some_and(|s| s.to_string() == station.as_str())
            || StationId::from_code(prefix, self.id) == *station
    }

    /// Exact, case-sensitive comparison against the stored hash.
    pub fn matches_hash(&self, hash: &FingerprintHash) -> bool {
        self.fingerprint_hash == hash.as_str()
    }

    /// Display name used for the local binding.
    pub fn display_name(&self, prefix: &str) -> String {
        match (self.department.as_deref(), self.location.as_deref()) {
            (Some(d), Some(l)) if !d.is_empty() && !l.is_empty() => format!("{} / {}", d, l),
            (Some(d), _) if !d.is_empty() => d.to_string(),
            (_, Some(l)) if !l.is_empty() => l.to_string(),
            _ => StationId::from_code(prefix, self.id).to_string(),
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub fingerprint_hash: FingerprintHash,
    pub department: String,
    pub location: String,
    pub browser_user_agent: String,
    pub screen_resolution: String,
    pub timezone: String,
    pub access_count: i64,
    pub is_active: bool,
}

/// Body of the administrative hash update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHashUpdate {
    pub fingerprint_hash: FingerprintHash,
}

/// One page of the device listing.
///
/// The registry either pages (`{content, totalPages, last, number}`) or
/// returns the whole list as a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DevicePage {
    Paged {
        content: Vec<Device>,
        #[serde(default, rename = "totalPages")]
        total_pages: Option<u32>,
        #[serde(default)]
        last: Option<bool>,
        #[serde(default)]
        number: Option<u32>,
    },
    Bare(Vec<Device>),
}

impl DevicePage {
    /// The registry answered with an earlier page than `requested`, as one
    /// that ignores the `page` parameter does.
    pub fn is_stale(&self, requested: u32) -> bool {
        match self {
            Self::Bare(_) => false,
            Self::Paged { number, .. } => number.is_some_and(|served| served < requested),
        }
    }

    /// Whether no page follows `requested` when pages hold `size` devices.
    pub fn is_last(&self, requested: u32, size: u32) -> bool {
        match self {
            Self::Bare(_) => true,
            Self::Paged { content, total_pages, last, number } => {
                if content.is_empty() {
                    return true;
                }
                if self.is_stale(requested) {
                    return true;
                }
                let served = number.unwrap_or(requested);
                if total_pages.is_some_and(|total| served.saturating_add(1) >= total) {
                    return true;
                }
                match last {
                    Some(last) => *last,
                    None => total_pages.is_none() && content.len() < size as usize,
                }
            }
        }
    }

    pub fn into_devices(self) -> Vec<Device> {
        match self {
            Self::Bare(devices) | Self::Paged { content: devices, .. } => devices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: i64, station_id: Option<i64>) -> Device {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "stationId": station_id,
            "fingerprintHash": "abc",
        }))
        .unwrap()
    }

    #[test]
    fn test_partial_payload_parses() {
        let d = device(7, Some(3));
        assert_eq!(d.id, 7);
        assert_eq!(d.station_id, Some(3));
        assert!(d.department.is_none());
        assert!(d.access_count.is_none());
    }

    #[test]
    fn test_answers_to_both_forms() {
        let d = device(7, Some(3));
        assert!(d.answers_to(&StationId::new("3"), "RX00-"));
        assert!(d.answers_to(&StationId::new("RX00-7"), "RX00-"));
        assert!(!d.answers_to(&StationId::new("7"), "RX00-"));

        let unassigned = device(9, None);
        assert_eq!(unassigned.resolved_station_id("RX00-").as_str(), "RX00-9");
    }

    #[test]
    fn test_page_shapes() {
        let bare: DevicePage = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert!(bare.is_last(0, 2));
        assert_eq!(bare.into_devices().len(), 2);

        let paged: DevicePage =
            serde_json::from_str(r#"{"content":[{"id":1}],"totalPages":3,"number":0}"#).unwrap();
        assert!(!paged.is_last(0, 1));

        let final_page: DevicePage =
            serde_json::from_str(r#"{"content":[{"id":1}],"last":true}"#).unwrap();
        assert!(final_page.is_last(2, 1));

        let short: DevicePage = serde_json::from_str(r#"{"content":[{"id":1}]}"#).unwrap();
        assert!(short.is_last(0, 50));

        let empty: DevicePage = serde_json::from_str(r#"{"content":[],"last":false}"#).unwrap();
        assert!(empty.is_last(3, 50));

        let echoed: DevicePage = serde_json::from_str(
            r#"{"content":[{"id":1}],"last":false,"number":0,"totalPages":5}"#,
        )
        .unwrap();
        assert!(!echoed.is_last(0, 1));
        assert!(echoed.is_stale(1));
        assert!(echoed.is_last(1, 1));

        let past_total: DevicePage =
            serde_json::from_str(r#"{"content":[{"id":1}],"last":false,"number":4,"totalPages":5}"#)
                .unwrap();
        assert!(past_total.is_last(4, 1));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut d = device(12, None);
        assert_eq!(d.display_name("RX00-"), "RX00-12");
        d.department = Some("Pharmacy".to_string());
        assert_eq!(d.display_name("RX00-"), "Pharmacy");
        d.location = Some("Counter 2".to_string());
        assert_eq!(d.display_name("RX00-"), "Pharmacy / Counter 2");
    }
}
