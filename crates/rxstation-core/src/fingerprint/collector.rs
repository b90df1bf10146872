//! Fingerprint collection.
//!
//! Every probe is guarded on its own: a probe that is unsupported, denied or
//! failing leaves its sentinel and collection carries on.

use rxstation_types::models::config::DEFAULT_CANDIDATE_FONTS;
use rxstation_types::models::{FingerprintRecord, UNAVAILABLE};
use tracing::{debug, info};

use super::canvas::CanvasScript;
use super::environment::{
    Environment, ProbeError, ProbeResult, StorageArea, WebApi, WebGlInfo,
};
use super::fonts::detect_fonts;

pub const WEBGL_NO_CONTEXT: &str = "no-webgl";
pub const WEBGL_NO_DEBUG_INFO: &str = "webgl-no-debug-info";
pub const WEBGL_ERROR: &str = "webgl-error";

/// Key written and removed by the storage probes.
const STORAGE_SENTINEL_KEY: &str = "__rxstation_probe__";

/// Checked in order, first hit wins.
const VENDOR_PREFIXES: [&str; 4] = ["webkit", "moz", "ms", "o"];

/// Counts degraded probes for the collection summary.
#[derive(Default)]
struct Degradations {
    count: usize,
}

impl Degradations {
    fn take<T>(&mut self, signal: &'static str, result: ProbeResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(reason) => {
                self.degrade(signal, &reason);
                None
            },
        }
    }

    fn degrade(&mut self, signal: &'static str, reason: &ProbeError) {
        self.count += 1;
        debug!(signal, %reason, "Signal unavailable");
    }

    fn string(&mut self, signal: &'static str, result: ProbeResult<String>) -> String {
        self.take(signal, result).unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    fn list<T>(&mut self, signal: &'static str, result: ProbeResult<Vec<T>>) -> Vec<T> {
        self.take(signal, result).unwrap_or_default()
    }

    fn flag(&mut self, signal: &'static str, result: ProbeResult<bool>) -> bool {
        self.take(signal, result).unwrap_or(false)
    }
}

/// Gathers runtime signals from an [`Environment`] into a [`FingerprintRecord`].
pub struct FingerprintCollector<E> {
    env: E,
    candidate_fonts: Vec<String>,
}

impl<E: Environment> FingerprintCollector<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            candidate_fonts: DEFAULT_CANDIDATE_FONTS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_candidate_fonts(mut self, fonts: Vec<String>) -> Self {
        self.candidate_fonts = fonts;
        self
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Take a fresh snapshot of every signal. Never fails.
    pub async fn collect(&self) -> FingerprintRecord {
        let env = &self.env;
        let mut d = Degradations::default();

        let screen = d.take("screen", env.screen());
        let screen_resolution = screen
            .map(|s| format!("{}x{}", s.width, s.height))
            .unwrap_or_else(|| UNAVAILABLE.to_string());

        let record = FingerprintRecord {
            user_agent: d.string("userAgent", env.user_agent()),
            platform: d.string("platform", env.platform()),
            language: d.string("language", env.language()),
            hardware_concurrency: d.take("hardwareConcurrency", env.hardware_concurrency()),
            device_memory: d.take("deviceMemory", env.device_memory()),
            max_touch_points: d.take("maxTouchPoints", env.max_touch_points()),
            screen_resolution,
            color_depth: screen.map(|s| s.color_depth),
            pixel_depth: screen.map(|s| s.pixel_depth),
            timezone: d.string("timezone", env.timezone().await),
            timezone_offset: d.take("timezoneOffset", env.timezone_offset()),
            canvas: d.string("canvas", env.render_canvas(&CanvasScript::probe())),
            webgl: webgl_signal(&mut d, env.webgl()),
            fonts: d.list("fonts", detect_fonts(env, &self.candidate_fonts)),
            plugins: d.list("plugins", env.plugins()),
            local_storage: d
                .flag("localStorage", probe_storage(env, StorageArea::LocalStorage).await),
            session_storage: d
                .flag("sessionStorage", probe_storage(env, StorageArea::SessionStorage).await),
            indexed_db: env.has_api(WebApi::IndexedDb),
            open_database: env.has_api(WebApi::OpenDatabase),
            do_not_track: d
                .take("doNotTrack", env.do_not_track())
                .flatten()
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            cookies_enabled: d.flag("cookiesEnabled", env.cookies_enabled()),
            vibration: env.has_api(WebApi::Vibrate),
            battery: d.take("battery", env.battery().await),
            media_devices: d.list("mediaDevices", env.media_devices().await),
            screen_brightness: d.take("screenBrightness", env.screen_brightness().await),
            vendor_prefix: d
                .take("vendorPrefix", env.style_properties().and_then(|p| vendor_prefix(&p)))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            cookie_store: env.has_api(WebApi::CookieStore),
            bluetooth: env.has_api(WebApi::Bluetooth),
            usb: env.has_api(WebApi::Usb),
            serial: env.has_api(WebApi::Serial),
        };

        info!(degraded = d.count, "Fingerprint collected");
        record
    }
}

fn webgl_signal(d: &mut Degradations, result: ProbeResult<Option<WebGlInfo>>) -> String {
    match result {
        Ok(Some(info)) => format!("{}~{}", info.vendor, info.renderer),
        Ok(None) => WEBGL_NO_DEBUG_INFO.to_string(),
        Err(reason) => {
            d.degrade("webgl", &reason);
            match reason {
                ProbeError::Unsupported => WEBGL_NO_CONTEXT.to_string(),
                _ => WEBGL_ERROR.to_string(),
            }
        },
    }
}

/// Write then remove a sentinel key; both must succeed.
async fn probe_storage<E: Environment + ?Sized>(env: &E, area: StorageArea) -> ProbeResult<bool> {
    env.storage_set(area, STORAGE_SENTINEL_KEY, STORAGE_SENTINEL_KEY).await?;
    env.storage_remove(area, STORAGE_SENTINEL_KEY).await?;
    Ok(true)
}

fn vendor_prefix(properties: &[String]) -> ProbeResult<String> {
    VENDOR_PREFIXES
        .iter()
        .find(|prefix| {
            let dashed = format!("-{}-", prefix);
            properties.iter().any(|p| p.starts_with(&dashed))
        })
        .map(|prefix| prefix.to_string())
        .ok_or_else(|| ProbeError::Failed("no vendor-prefixed style property".to_string()))
}
