//! Native host probes.
//!
//! Only what the operating system exposes is reported. Rendering probes
//! (canvas, WebGL, text measurement) stay unsupported and degrade to
//! sentinels.

use async_trait::async_trait;
use chrono::Local;
use rxstation_types::models::{BatteryStatus, MediaDeviceInfo};
use std::path::{Path, PathBuf};
use sysinfo::System;

use super::environment::{Environment, ProbeError, ProbeResult, StorageArea};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
const VIDEO_DEVICE_DIR: &str = "/sys/class/video4linux";
const BACKLIGHT_DIR: &str = "/sys/class/backlight";
const TIMEZONE_FILE: &str = "/etc/timezone";
const LOCALTIME_LINK: &str = "/etc/localtime";
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// [`Environment`] for the machine the agent runs on.
pub struct HostEnvironment {
    /// Backing directory for the local storage area
    storage_dir: PathBuf,
    total_memory: u64,
}

impl HostEnvironment {
    pub fn new(storage_dir: PathBuf) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        Self { storage_dir, total_memory: sys.total_memory() }
    }

    fn area_dir(&self, area: StorageArea) -> PathBuf {
        match area {
            StorageArea::LocalStorage => self.storage_dir.clone(),
            StorageArea::SessionStorage => {
                std::env::temp_dir().join(format!("rxstation-session-{}", std::process::id()))
            },
        }
    }
}

fn failed(e: impl std::fmt::Display) -> ProbeError {
    ProbeError::Failed(e.to_string())
}

/// `en_US.UTF-8` -> `en-US`
pub(crate) fn locale_to_language(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next()?.trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Zone name from a `/usr/share/zoneinfo/...` link target.
pub(crate) fn zone_from_link(target: &Path) -> Option<String> {
    let target = target.to_string_lossy();
    let (_, zone) = target.split_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

/// Browsers report device memory rounded down to a power of two.
pub(crate) fn approximate_gib(bytes: u64) -> Option<f64> {
    if bytes == 0 {
        return None;
    }
    let gib = bytes as f64 / BYTES_PER_GIB;
    Some(2f64.powi(gib.log2().floor() as i32))
}

async fn read_trimmed(path: &Path) -> Option<String> {
    tokio::fs::read_to_string(path).await.ok().map(|s| s.trim().to_string())
}

#[async_trait]
impl Environment for HostEnvironment {
    fn user_agent(&self) -> ProbeResult<String> {
        let os = System::long_os_version().ok_or(ProbeError::Unsupported)?;
        Ok(format!(
            "rxstation/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            os,
            std::env::consts::ARCH
        ))
    }

    fn platform(&self) -> ProbeResult<String> {
        let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        Ok(format!("{} {}", name, std::env::consts::ARCH))
    }

    fn language(&self) -> ProbeResult<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|locale| locale_to_language(&locale))
            .ok_or(ProbeError::Unsupported)
    }

    fn hardware_concurrency(&self) -> ProbeResult<u32> {
        std::thread::available_parallelism().map(|n| n.get() as u32).map_err(failed)
    }

    fn device_memory(&self) -> ProbeResult<f64> {
        approximate_gib(self.total_memory).ok_or(ProbeError::Unsupported)
    }

    fn max_touch_points(&self) -> ProbeResult<u32> {
        Ok(0)
    }

    async fn timezone(&self) -> ProbeResult<String> {
        if let Ok(tz) = std::env::var("TZ") {
            let tz = tz.trim_start_matches(':').trim();
            if !tz.is_empty() {
                return Ok(tz.to_string());
            }
        }
        if let Some(tz) = read_trimmed(Path::new(TIMEZONE_FILE)).await.filter(|tz| !tz.is_empty()) {
            return Ok(tz);
        }
        tokio::fs::read_link(LOCALTIME_LINK)
            .await
            .ok()
            .and_then(|target| zone_from_link(&target))
            .ok_or(ProbeError::Unsupported)
    }

    fn timezone_offset(&self) -> ProbeResult<i32> {
        Ok(-Local::now().offset().local_minus_utc() / 60)
    }

    async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
        let dir = self.area_dir(area);
        tokio::fs::create_dir_all(&dir).await.map_err(failed)?;
        tokio::fs::write(dir.join(key), value).await.map_err(failed)
    }

    async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()> {
        let dir = self.area_dir(area);
        tokio::fs::remove_file(dir.join(key)).await.map_err(failed)?;
        if area == StorageArea::SessionStorage {
            let _ = tokio::fs::remove_dir(&dir).await;
        }
        Ok(())
    }

    fn do_not_track(&self) -> ProbeResult<Option<String>> {
        Ok(None)
    }

    async fn battery(&self) -> ProbeResult<BatteryStatus> {
        let mut entries =
            tokio::fs::read_dir(POWER_SUPPLY_DIR).await.map_err(|_| ProbeError::Unsupported)?;

        while let Some(entry) = entries.next_entry().await.map_err(failed)? {
            let dir = entry.path();
            if read_trimmed(&dir.join("type")).await.as_deref() != Some("Battery") {
                continue;
            }
            let capacity: f64 = read_trimmed(&dir.join("capacity"))
                .await
                .and_then(|c| c.parse().ok())
                .ok_or_else(|| failed("battery capacity unreadable"))?;
            let status = read_trimmed(&dir.join("status")).await.unwrap_or_default();

            return Ok(BatteryStatus {
                level: (capacity / 100.0).clamp(0.0, 1.0),
                charging: matches!(status.as_str(), "Charging" | "Full"),
                charging_time: None,
                discharging_time: None,
            });
        }
        Err(ProbeError::Unsupported)
    }

    async fn media_devices(&self) -> ProbeResult<Vec<MediaDeviceInfo>> {
        let mut entries =
            tokio::fs::read_dir(VIDEO_DEVICE_DIR).await.map_err(|_| ProbeError::Unsupported)?;

        let mut devices = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(failed)? {
            let label = read_trimmed(&entry.path().join("name")).await.unwrap_or_default();
            devices.push(MediaDeviceInfo { kind: "videoinput".to_string(), label });
        }
        devices.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(devices)
    }

    async fn screen_brightness(&self) -> ProbeResult<f64> {
        let mut entries =
            tokio::fs::read_dir(BACKLIGHT_DIR).await.map_err(|_| ProbeError::Unsupported)?;

        let Some(entry) = entries.next_entry().await.map_err(failed)? else {
            return Err(ProbeError::Unsupported);
        };
        let read = |name: &'static str| {
            let path = entry.path().join(name);
            async move { read_trimmed(&path).await.and_then(|v| v.parse::<f64>().ok()) }
        };
        match (read("brightness").await, read("max_brightness").await) {
            (Some(current), Some(max)) if max > 0.0 => Ok((current / max).clamp(0.0, 1.0)),
            _ => Err(failed("backlight unreadable")),
        }
    }
}
