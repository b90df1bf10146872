//! Runtime environment abstraction for signal probes.
//!
//! Every probe defaults to [`ProbeError::Unsupported`], so an environment
//! only implements what it can actually observe.

use async_trait::async_trait;
use rxstation_types::models::{BatteryStatus, MediaDeviceInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::canvas::CanvasScript;

/// Why a single probe produced no value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("not supported by this environment")]
    Unsupported,
    #[error("denied: {0}")]
    Denied(String),
    #[error("probe failed: {0}")]
    Failed(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_depth: u32,
}

/// Unmasked WebGL vendor/renderer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebGlInfo {
    pub vendor: String,
    pub renderer: String,
}

/// Key/value storage areas probed with a sentinel write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageArea {
    LocalStorage,
    SessionStorage,
}

/// APIs whose mere presence is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebApi {
    IndexedDb,
    OpenDatabase,
    Vibrate,
    CookieStore,
    Bluetooth,
    Usb,
    Serial,
}

#[async_trait]
pub trait Environment: Send + Sync {
    fn user_agent(&self) -> ProbeResult<String> {
        Err(ProbeError::Unsupported)
    }

    fn platform(&self) -> ProbeResult<String> {
        Err(ProbeError::Unsupported)
    }

    fn language(&self) -> ProbeResult<String> {
        Err(ProbeError::Unsupported)
    }

    fn hardware_concurrency(&self) -> ProbeResult<u32> {
        Err(ProbeError::Unsupported)
    }

    /// Approximate memory in GiB.
    fn device_memory(&self) -> ProbeResult<f64> {
        Err(ProbeError::Unsupported)
    }

    fn max_touch_points(&self) -> ProbeResult<u32> {
        Err(ProbeError::Unsupported)
    }

    fn screen(&self) -> ProbeResult<ScreenInfo> {
        Err(ProbeError::Unsupported)
    }

    async fn timezone(&self) -> ProbeResult<String> {
        Err(ProbeError::Unsupported)
    }

    /// Minutes west of UTC.
    fn timezone_offset(&self) -> ProbeResult<i32> {
        Err(ProbeError::Unsupported)
    }

    /// Render `script` and serialize the result as a data URI.
    fn render_canvas(&self, _script: &CanvasScript) -> ProbeResult<String> {
        Err(ProbeError::Unsupported)
    }

    /// `Ok(None)` means a context exists but the debug-renderer extension does not.
    fn webgl(&self) -> ProbeResult<Option<WebGlInfo>> {
        Err(ProbeError::Unsupported)
    }

    /// Rendered width of `text` in CSS pixels for a CSS font shorthand.
    fn measure_text(&self, _text: &str, _font: &str) -> ProbeResult<f64> {
        Err(ProbeError::Unsupported)
    }

    fn plugins(&self) -> ProbeResult<Vec<String>> {
        Err(ProbeError::Unsupported)
    }

    async fn storage_set(&self, _area: StorageArea, _key: &str, _value: &str) -> ProbeResult<()> {
        Err(ProbeError::Unsupported)
    }

    async fn storage_remove(&self, _area: StorageArea, _key: &str) -> ProbeResult<()> {
        Err(ProbeError::Unsupported)
    }

    fn has_api(&self, _api: WebApi) -> bool {
        false
    }

    /// Raw do-not-track value; `Ok(None)` when the user expressed no preference.
    fn do_not_track(&self) -> ProbeResult<Option<String>> {
        Err(ProbeError::Unsupported)
    }

    fn cookies_enabled(&self) -> ProbeResult<bool> {
        Err(ProbeError::Unsupported)
    }

    /// Style property names known to the rendering engine.
    fn style_properties(&self) -> ProbeResult<Vec<String>> {
        Err(ProbeError::Unsupported)
    }

    async fn battery(&self) -> ProbeResult<BatteryStatus> {
        Err(ProbeError::Unsupported)
    }

    async fn media_devices(&self) -> ProbeResult<Vec<MediaDeviceInfo>> {
        Err(ProbeError::Unsupported)
    }

    /// Brightness in `0.0..=1.0`.
    async fn screen_brightness(&self) -> ProbeResult<f64> {
        Err(ProbeError::Unsupported)
    }
}

#[async_trait]
impl<T: Environment + ?Sized> Environment for Box<T> {
    fn user_agent(&self) -> ProbeResult<String> {
        (**self).user_agent()
    }
    fn platform(&self) -> ProbeResult<String> {
        (**self).platform()
    }
    fn language(&self) -> ProbeResult<String> {
        (**self).language()
    }
    fn hardware_concurrency(&self) -> ProbeResult<u32> {
        (**self).hardware_concurrency()
    }
    fn device_memory(&self) -> ProbeResult<f64> {
        (**self).device_memory()
    }
    fn max_touch_points(&self) -> ProbeResult<u32> {
        (**self).max_touch_points()
    }
    fn screen(&self) -> ProbeResult<ScreenInfo> {
        (**self).screen()
    }
    async fn timezone(&self) -> ProbeResult<String> {
        (**self).timezone().await
    }
    fn timezone_offset(&self) -> ProbeResult<i32> {
        (**self).timezone_offset()
    }
    fn render_canvas(&self, script: &CanvasScript) -> ProbeResult<String> {
        (**self).render_canvas(script)
    }
    fn webgl(&self) -> ProbeResult<Option<WebGlInfo>> {
        (**self).webgl()
    }
    fn measure_text(&self, text: &str, font: &str) -> ProbeResult<f64> {
        (**self).measure_text(text, font)
    }
    fn plugins(&self) -> ProbeResult<Vec<String>> {
        (**self).plugins()
    }
    async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
        (**self).storage_set(area, key, value).await
    }
    async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()> {
        (**self).storage_remove(area, key).await
    }
    fn has_api(&self, api: WebApi) -> bool {
        (**self).has_api(api)
    }
    fn do_not_track(&self) -> ProbeResult<Option<String>> {
        (**self).do_not_track()
    }
    fn cookies_enabled(&self) -> ProbeResult<bool> {
        (**self).cookies_enabled()
    }
    fn style_properties(&self) -> ProbeResult<Vec<String>> {
        (**self).style_properties()
    }
    async fn battery(&self) -> ProbeResult<BatteryStatus> {
        (**self).battery().await
    }
    async fn media_devices(&self) -> ProbeResult<Vec<MediaDeviceInfo>> {
        (**self).media_devices().await
    }
    async fn screen_brightness(&self) -> ProbeResult<f64> {
        (**self).screen_brightness().await
    }
}
