use rxstation_types::models::StationConfig;
use rxstation_types::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "station_config.json";
const BINDING_FILE: &str = "station_binding.json";
const LOG_DIR: &str = "logs";
/// Directory under the home directory when no override is set.
const DATA_DIR: &str = ".rxstation";

pub const DATA_DIR_ENV: &str = "RXSTATION_DATA_DIR";
pub const REGISTRY_URL_ENV: &str = "RXSTATION_REGISTRY_URL";
pub const TOKEN_ENV: &str = "RXSTATION_TOKEN";

/// Get the data directory path, creating it if necessary.
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or_else(|| ConfigError::DataDirUnavailable {
                message: "failed to get home directory".to_string(),
            })?
            .join(DATA_DIR),
    };
    ensure_dir(&data_dir)?;
    Ok(data_dir)
}

/// Create `dir` if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::DataDirUnavailable {
        message: format!("failed to create {}: {}", dir.display(), e),
    })
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

pub fn binding_path(data_dir: &Path) -> PathBuf {
    data_dir.join(BINDING_FILE)
}

pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_DIR)
}

/// Load configuration from the default data directory.
pub fn load_config() -> Result<StationConfig, ConfigError> {
    load_config_from(&get_data_dir()?)
}

/// Load configuration from `data_dir`; a missing file yields defaults.
///
/// Values are not validated here: overrides may still replace them, so
/// callers validate the merged result.
pub fn load_config_from(data_dir: &Path) -> Result<StationConfig, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(StationConfig::new());
    }

    let content = fs::read_to_string(&path).map_err(|e| ConfigError::unreadable(&path, e))?;
    let config: StationConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::malformed(&path, e))?;
    Ok(config)
}

/// Save configuration to the default data directory.
pub fn save_config(config: &StationConfig) -> Result<(), ConfigError> {
    save_config_to(&get_data_dir()?, config)
}

pub fn save_config_to(data_dir: &Path, config: &StationConfig) -> Result<(), ConfigError> {
    config.validate()?;
    ensure_dir(data_dir)?;

    let config_path = config_path(data_dir);
    let temp_path = data_dir.join(format!("{}.tmp", CONFIG_FILE));
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::write_failed(&config_path, e))?;

    // Atomic write
    fs::write(&temp_path, content).map_err(|e| ConfigError::write_failed(&temp_path, e))?;
    fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::write_failed(&config_path, e))
}

/// Apply `RXSTATION_REGISTRY_URL` / `RXSTATION_TOKEN`.
pub fn apply_env_overrides(config: &mut StationConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

pub(crate) fn apply_overrides<F>(config: &mut StationConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(REGISTRY_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.registry.base_url = url.trim().to_string();
    }
    if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
        config.registry.token = Some(token.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxstation_types::models::HashScope;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config, StationConfig::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StationConfig::new();
        config.registry.base_url = "https://registry.pharmacy.local".to_string();
        config.fingerprint.hash_scope = HashScope::Stable;
        config.station.default_location = Some("Drive-Thru".to_string());

        save_config_to(dir.path(), &config).unwrap();
        assert!(!dir.path().join("station_config.json.tmp").exists());
        assert_eq!(load_config_from(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            config_path(dir.path()),
            r#"{"registry": {"base_url": "http://10.0.0.5:9000", "page_size": 25}}"#,
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config.registry.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.registry.page_size, 25);
        assert_eq!(config.registry.timeout_secs, 10);
        assert_eq!(config.station.prefix, "RX00-");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), "{ nope").unwrap();
        assert!(matches!(load_config_from(dir.path()), Err(ConfigError::Malformed { .. })));

    }

    #[test]
    fn test_env_override_repairs_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), r#"{"registry": {"base_url": "ftp://x"}}"#).unwrap();

        let mut config = load_config_from(dir.path()).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        apply_overrides(&mut config, |key| {
            (key == REGISTRY_URL_ENV).then(|| "https://devices.example.org".to_string())
        });
        assert!(config.validate().is_ok());
        assert_eq!(config.registry.base_url, "https://devices.example.org");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StationConfig::new();
        apply_overrides(&mut config, |key| match key {
            REGISTRY_URL_ENV => Some("https://devices.example.org".to_string()),
            TOKEN_ENV => Some(" secret ".to_string()),
            _ => None,
        });

        assert_eq!(config.registry.base_url, "https://devices.example.org");
        assert_eq!(config.registry.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_paths() {
        let dir = Path::new("/var/lib/rxstation");
        assert_eq!(binding_path(dir), dir.join("station_binding.json"));
        assert_eq!(log_dir(dir), dir.join("logs"));
    }
}
