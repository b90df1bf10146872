use rxstation_types::models::{BatteryStatus, FingerprintRecord, MediaDeviceInfo};

/// Fully populated record for hashing tests.
pub(crate) fn sample_record() -> FingerprintRecord {
    FingerprintRecord {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        platform: "Win32".to_string(),
        language: "en-US".to_string(),
        hardware_concurrency: Some(8),
        device_memory: Some(8.0),
        max_touch_points: Some(0),
        screen_resolution: "1920x1080".to_string(),
        color_depth: Some(24),
        pixel_depth: Some(24),
        timezone: "America/New_York".to_string(),
        timezone_offset: Some(240),
        canvas: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        webgl: "Google Inc. (Intel)~ANGLE (Intel, Intel(R) UHD Graphics 620)".to_string(),
        fonts: vec!["Arial".to_string(), "Georgia".to_string(), "Verdana".to_string()],
        plugins: vec!["PDF Viewer".to_string()],
        local_storage: true,
        session_storage: true,
        indexed_db: true,
        open_database: false,
        do_not_track: "1".to_string(),
        cookies_enabled: true,
        vibration: false,
        battery: Some(BatteryStatus {
            level: 0.8,
            charging: true,
            charging_time: Some(1200.0),
            discharging_time: None,
        }),
        media_devices: vec![MediaDeviceInfo {
            kind: "videoinput".to_string(),
            label: "Integrated Camera".to_string(),
        }],
        screen_brightness: None,
        vendor_prefix: "webkit".to_string(),
        cookie_store: true,
        bluetooth: true,
        usb: true,
        serial: false,
    }
}
