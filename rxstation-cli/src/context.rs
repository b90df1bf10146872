//! Per-invocation state: data directory, merged configuration, logging.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

use rxstation_client::RegistryClient;
use rxstation_core::modules::{config as core_config, logger};
use rxstation_core::{
    BinderSettings, Environment, FileBindingStore, FingerprintCollector, HostEnvironment,
    SnapshotEnvironment, StationBinder,
};
use rxstation_types::models::StationConfig;

use crate::cli::Cli;

pub type Binder = StationBinder<RegistryClient, FileBindingStore, Box<dyn Environment>>;

pub struct AppContext {
    pub data_dir: PathBuf,
    pub config: StationConfig,
    signals: Option<PathBuf>,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    /// Resolve configuration: file, then environment, then flags.
    pub fn init(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => {
                core_config::ensure_dir(dir)?;
                dir.clone()
            },
            None => core_config::get_data_dir()?,
        };

        let mut config = core_config::load_config_from(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
        core_config::apply_env_overrides(&mut config);
        if let Some(url) = &cli.registry_url {
            config.registry.base_url = url.clone();
        }
        if let Some(token) = &cli.token {
            config.registry.token = Some(token.clone());
        }
        config.validate()?;

        let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
        let log_dir = config.log_to_file.then(|| core_config::log_dir(&data_dir));
        let log_guard = logger::init_logger(&level, log_dir.as_deref())?;

        Ok(Self { data_dir, config, signals: cli.signals.clone(), _log_guard: log_guard })
    }

    pub fn token(&self) -> Result<&str> {
        self.config
            .registry
            .token
            .as_deref()
            .context("No registry token: pass --token or set RXSTATION_TOKEN")
    }

    async fn environment(&self) -> Result<Box<dyn Environment>> {
        match &self.signals {
            Some(path) => {
                let env = SnapshotEnvironment::from_path(path)
                    .await
                    .with_context(|| format!("Failed to read signals from {}", path.display()))?;
                tracing::debug!("Replaying signals from {}", path.display());
                Ok(Box::new(env))
            },
            None => Ok(Box::new(HostEnvironment::new(self.data_dir.join("storage")))),
        }
    }

    pub async fn binder(&self) -> Result<Binder> {
        let client = RegistryClient::new(self.config.registry.clone())
            .context("Failed to build registry client")?;
        let store = FileBindingStore::new(core_config::binding_path(&self.data_dir));
        let collector = FingerprintCollector::new(self.environment().await?)
            .with_candidate_fonts(self.config.fingerprint.candidate_fonts.clone());

        Ok(StationBinder::new(client, store, collector, BinderSettings::from_config(&self.config)))
    }
}
