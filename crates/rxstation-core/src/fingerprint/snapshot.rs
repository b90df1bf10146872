//! Replay of signals captured by a browser agent.
//!
//! A missing field behaves exactly like an unsupported browser API.

use async_trait::async_trait;
use rxstation_types::models::{BatteryStatus, MediaDeviceInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::canvas::CanvasScript;
use super::environment::{
    Environment, ProbeError, ProbeResult, ScreenInfo, StorageArea, WebApi, WebGlInfo,
};
use crate::error::StationResult;

/// WebGL probe outcome as seen by the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WebGlSnapshot {
    NoContext,
    NoDebugInfo,
    Available { vendor: String, renderer: String },
    Error { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalSnapshot {
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub language: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub max_touch_points: Option<u32>,
    pub screen: Option<ScreenInfo>,
    pub timezone: Option<String>,
    pub timezone_offset: Option<i32>,
    /// Data URI the agent produced from the probe script
    pub canvas: Option<String>,
    pub webgl: Option<WebGlSnapshot>,
    /// Measured width per CSS font shorthand
    pub font_widths: Option<BTreeMap<String, f64>>,
    pub plugins: Option<Vec<String>>,
    /// Whether a sentinel write/remove succeeded, per area
    pub local_storage: Option<bool>,
    pub session_storage: Option<bool>,
    pub apis: Vec<WebApi>,
    /// Raw `navigator.doNotTrack`
    pub do_not_track: Option<String>,
    pub cookies_enabled: Option<bool>,
    pub style_properties: Option<Vec<String>>,
    pub battery: Option<BatteryStatus>,
    pub media_devices: Option<Vec<MediaDeviceInfo>>,
    pub screen_brightness: Option<f64>,
}

/// [`Environment`] backed by a [`SignalSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotEnvironment {
    snapshot: SignalSnapshot,
}

impl SnapshotEnvironment {
    pub fn new(snapshot: SignalSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    pub async fn from_path(path: &Path) -> StationResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::from_json(&content)?)
    }

    pub fn snapshot(&self) -> &SignalSnapshot {
        &self.snapshot
    }

    fn storage(&self, area: StorageArea) -> ProbeResult<()> {
        let writable = match area {
            StorageArea::LocalStorage => self.snapshot.local_storage,
            StorageArea::SessionStorage => self.snapshot.session_storage,
        };
        match writable {
            Some(true) => Ok(()),
            Some(false) => Err(ProbeError::Denied("storage write rejected".to_string())),
            None => Err(ProbeError::Unsupported),
        }
    }
}

fn recorded<T: Clone>(value: &Option<T>) -> ProbeResult<T> {
    value.clone().ok_or(ProbeError::Unsupported)
}

#[async_trait]
impl Environment for SnapshotEnvironment {
    fn user_agent(&self) -> ProbeResult<String> {
        recorded(&self.snapshot.user_agent)
    }

    fn platform(&self) -> ProbeResult<String> {
        recorded(&self.snapshot.platform)
    }

    fn language(&self) -> ProbeResult<String> {
        recorded(&self.snapshot.language)
    }

    fn hardware_concurrency(&self) -> ProbeResult<u32> {
        recorded(&self.snapshot.hardware_concurrency)
    }

    fn device_memory(&self) -> ProbeResult<f64> {
        recorded(&self.snapshot.device_memory)
    }

    fn max_touch_points(&self) -> ProbeResult<u32> {
        recorded(&self.snapshot.max_touch_points)
    }

    fn screen(&self) -> ProbeResult<ScreenInfo> {
        recorded(&self.snapshot.screen)
    }

    async fn timezone(&self) -> ProbeResult<String> {
        recorded(&self.snapshot.timezone)
    }

    fn timezone_offset(&self) -> ProbeResult<i32> {
        recorded(&self.snapshot.timezone_offset)
    }

    // The agent already ran the fixed script; the render is replayed as-is.
    fn render_canvas(&self, _script: &CanvasScript) -> ProbeResult<String> {
        recorded(&self.snapshot.canvas)
    }

    fn webgl(&self) -> ProbeResult<Option<WebGlInfo>> {
        match &self.snapshot.webgl {
            None | Some(WebGlSnapshot::NoContext) => Err(ProbeError::Unsupported),
            Some(WebGlSnapshot::NoDebugInfo) => Ok(None),
            Some(WebGlSnapshot::Available { vendor, renderer }) => {
                Ok(Some(WebGlInfo { vendor: vendor.clone(), renderer: renderer.clone() }))
            },
            Some(WebGlSnapshot::Error { message }) => Err(ProbeError::Failed(message.clone())),
        }
    }

    fn measure_text(&self, _text: &str, font: &str) -> ProbeResult<f64> {
        self.snapshot
            .font_widths
            .as_ref()
            .and_then(|widths| widths.get(font).copied())
            .ok_or(ProbeError::Unsupported)
    }

    fn plugins(&self) -> ProbeResult<Vec<String>> {
        recorded(&self.snapshot.plugins)
    }

    async fn storage_set(&self, area: StorageArea, _key: &str, _value: &str) -> ProbeResult<()> {
        self.storage(area)
    }

    async fn storage_remove(&self, area: StorageArea, _key: &str) -> ProbeResult<()> {
        self.storage(area)
    }

    fn has_api(&self, api: WebApi) -> bool {
        self.snapshot.apis.contains(&api)
    }

    fn do_not_track(&self) -> ProbeResult<Option<String>> {
        recorded(&self.snapshot.do_not_track).map(Some)
    }

    fn cookies_enabled(&self) -> ProbeResult<bool> {
        recorded(&self.snapshot.cookies_enabled)
    }

    fn style_properties(&self) -> ProbeResult<Vec<String>> {
        recorded(&self.snapshot.style_properties)
    }

    async fn battery(&self) -> ProbeResult<BatteryStatus> {
        recorded(&self.snapshot.battery)
    }

    async fn media_devices(&self) -> ProbeResult<Vec<MediaDeviceInfo>> {
        recorded(&self.snapshot.media_devices)
    }

    async fn screen_brightness(&self) -> ProbeResult<f64> {
        recorded(&self.snapshot.screen_brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{FingerprintCollector, WEBGL_ERROR, WEBGL_NO_DEBUG_INFO};
    use rxstation_types::models::UNAVAILABLE;

    const SNAPSHOT: &str = r#"{
        "userAgent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        "platform": "Win32",
        "hardwareConcurrency": 8,
        "screen": {"width": 2560, "height": 1440, "colorDepth": 24, "pixelDepth": 24},
        "timezone": "America/Chicago",
        "timezoneOffset": 300,
        "webgl": {"status": "noDebugInfo"},
        "fontWidths": {
            "72px monospace": 520.0,
            "72px 'Verdana', monospace": 611.5
        },
        "localStorage": true,
        "sessionStorage": false,
        "apis": ["indexedDb", "serial"],
        "doNotTrack": null,
        "styleProperties": ["-webkit-appearance"]
    }"#;

    #[tokio::test]
    async fn test_snapshot_replay() {
        let env = SnapshotEnvironment::from_json(SNAPSHOT).unwrap();
        let collector = FingerprintCollector::new(env).with_candidate_fonts(vec![
            "Verdana".to_string(),
            "Impact".to_string(),
        ]);
        let record = collector.collect().await;

        assert_eq!(record.platform, "Win32");
        assert_eq!(record.hardware_concurrency, Some(8));
        assert_eq!(record.screen_resolution, "2560x1440");
        assert_eq!(record.timezone_offset, Some(300));
        assert_eq!(record.webgl, WEBGL_NO_DEBUG_INFO);
        assert_eq!(record.fonts, vec!["Verdana".to_string()]);
        assert!(record.local_storage);
        assert!(!record.session_storage);
        assert!(record.indexed_db);
        assert!(record.serial);
        assert!(!record.usb);
        assert_eq!(record.do_not_track, UNAVAILABLE);
        assert_eq!(record.vendor_prefix, "webkit");
        assert_eq!(record.language, UNAVAILABLE);
        assert_eq!(record.canvas, UNAVAILABLE);
    }

    #[test]
    fn test_do_not_track_value_and_missing() {
        let with_value = SnapshotEnvironment::from_json(r#"{"doNotTrack": "1"}"#).unwrap();
        let with_null = SnapshotEnvironment::from_json(r#"{"doNotTrack": null}"#).unwrap();

        assert_eq!(with_value.do_not_track(), Ok(Some("1".to_string())));
        assert_eq!(with_null.do_not_track(), Err(ProbeError::Unsupported));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let env = SnapshotEnvironment::from_json(r#"{"futureSignal": 1, "platform": "Linux"}"#)
            .unwrap();
        assert_eq!(env.platform(), Ok("Linux".to_string()));
        assert_eq!(env.user_agent(), Err(ProbeError::Unsupported));
    }

    #[tokio::test]
    async fn test_webgl_error_snapshot() {
        let env =
            SnapshotEnvironment::from_json(r#"{"webgl": {"status": "error", "message": "lost"}}"#)
                .unwrap();
        let record = FingerprintCollector::new(env).collect().await;
        assert_eq!(record.webgl, WEBGL_ERROR);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let env = SnapshotEnvironment::from_path(&path).await.unwrap();
        assert_eq!(env.snapshot().platform.as_deref(), Some("Win32"));

        assert!(SnapshotEnvironment::from_path(&dir.path().join("missing.json")).await.is_err());
    }
}
