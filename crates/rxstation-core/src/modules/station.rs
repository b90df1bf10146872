//! Station binding reconciliation.
//!
//! Decides whether this agent is a previously registered station or must
//! register as a new one, and keeps the local binding in step with the
//! registry.

use rxstation_types::models::{
    Device, DeviceHashUpdate, FingerprintHash, FingerprintRecord, HashScope, NewDevice,
    StationBinding, StationConfig, StationId,
};
use rxstation_types::RegistryError;
use std::future::Future;
use sysinfo::System;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::binding::BindingStore;
use super::registry::DeviceRegistry;
use crate::error::{StationError, StationResult};
use crate::fingerprint::{hash_record, Environment, FingerprintCollector};

/// Location used when neither the config nor the host name provides one.
const FALLBACK_LOCATION: &str = "Front Counter";
/// Hash characters shown in log lines.
const HASH_LOG_LEN: usize = 12;

/// Registration defaults and hashing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderSettings {
    pub prefix: String,
    pub department: String,
    pub location: String,
    pub hash_scope: HashScope,
}

impl BinderSettings {
    pub fn from_config(config: &StationConfig) -> Self {
        let location = config
            .station
            .default_location
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(System::host_name)
            .unwrap_or_else(|| FALLBACK_LOCATION.to_string());

        Self {
            prefix: config.station.prefix.clone(),
            department: config.station.default_department.clone(),
            location,
            hash_scope: config.fingerprint.hash_scope,
        }
    }
}

/// How a resolution was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Existing local binding still names a registered device.
    Cached,
    /// Fresh hash matched a registered device.
    Reconnected,
    /// No device matched; a new one was created.
    Registered,
}

impl std::fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cached => "cached",
            Self::Reconnected => "reconnected",
            Self::Registered => "registered",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationResolution {
    pub binding: StationBinding,
    pub outcome: ResolutionOutcome,
    /// Registry record behind the binding.
    pub device: Device,
}

impl StationResolution {
    pub fn station_id(&self) -> &StationId {
        &self.binding.station_id
    }
}

/// Station state after start-up, with registry failures folded in.
#[derive(Debug, Clone, PartialEq)]
pub enum StationState {
    Bound(StationResolution),
    Unbound { reason: String, retryable: bool },
}

/// Fresh fingerprint and its digest.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    pub record: FingerprintRecord,
    pub hash: FingerprintHash,
    pub scope: HashScope,
}

/// Old vs new hash for a device, awaiting operator confirmation.
#[derive(Debug, Clone)]
pub struct HashUpdateProposal {
    device: Device,
    proposed: FingerprintHash,
}

impl HashUpdateProposal {
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Hash as currently stored in the registry.
    pub fn current_hash(&self) -> &str {
        &self.device.fingerprint_hash
    }

    pub fn proposed_hash(&self) -> &FingerprintHash {
        &self.proposed
    }

    pub fn is_changed(&self) -> bool {
        !self.device.matches_hash(&self.proposed)
    }

    pub fn confirm(self) -> ConfirmedHashUpdate {
        ConfirmedHashUpdate { device: self.device, proposed: self.proposed }
    }
}

/// A proposal the operator accepted. Only these can be submitted.
#[derive(Debug, Clone)]
pub struct ConfirmedHashUpdate {
    device: Device,
    proposed: FingerprintHash,
}

impl ConfirmedHashUpdate {
    pub fn device_id(&self) -> i64 {
        self.device.id
    }
}

/// Reconciles the local fingerprint against the device registry.
pub struct StationBinder<R, S, E> {
    registry: R,
    store: S,
    collector: FingerprintCollector<E>,
    settings: BinderSettings,
}

impl<R, S, E> StationBinder<R, S, E>
where
    R: DeviceRegistry,
    S: BindingStore,
    E: Environment,
{
    pub fn new(
        registry: R,
        store: S,
        collector: FingerprintCollector<E>,
        settings: BinderSettings,
    ) -> Self {
        Self { registry, store, collector, settings }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &BinderSettings {
        &self.settings
    }

    /// Resolve the station this agent is bound to, registering it if needed.
    ///
    /// Registry failures surface as [`StationError::Initialization`] and
    /// leave any existing binding untouched. Once `cancel` fires, no create
    /// call is issued and no binding is written.
    pub async fn resolve_station(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> StationResult<StationResolution> {
        let prefix = self.settings.prefix.as_str();
        let mut fetched = None;

        if let Some(binding) = self.load_binding_lenient().await {
            let devices = guarded(cancel, self.registry.list_devices(token)).await?;
            if let Some(device) = devices.iter().find(|d| d.answers_to(&binding.station_id, prefix))
            {
                info!("Station {} still registered as device {}", binding.station_id, device.id);
                let device = device.clone();
                return Ok(StationResolution {
                    binding,
                    outcome: ResolutionOutcome::Cached,
                    device,
                });
            }
            info!("Bound station {} no longer registered, re-resolving", binding.station_id);
            fetched = Some(devices);
        }

        let fingerprint = self.fingerprint().await?;
        let hash = fingerprint.hash;
        let devices = match fetched {
            Some(devices) => devices,
            None => guarded(cancel, self.registry.list_devices(token)).await?,
        };
        debug!("Matching hash {} against {} devices", hash.short(HASH_LOG_LEN), devices.len());

        if let Some(device) = devices.into_iter().find(|d| d.matches_hash(&hash)) {
            let binding = StationBinding::new(
                device.resolved_station_id(prefix),
                device.display_name(prefix),
                hash,
            );
            self.write_binding(&binding, cancel).await?;
            info!("Reconnected as station {} (device {})", binding.station_id, device.id);
            return Ok(StationResolution {
                binding,
                outcome: ResolutionOutcome::Reconnected,
                device,
            });
        }

        ensure_live(cancel)?;
        let new_device = NewDevice {
            fingerprint_hash: hash.clone(),
            department: self.settings.department.clone(),
            location: self.settings.location.clone(),
            browser_user_agent: fingerprint.record.user_agent,
            screen_resolution: fingerprint.record.screen_resolution,
            timezone: fingerprint.record.timezone,
            access_count: 1,
            is_active: true,
        };
        let device = guarded(cancel, self.registry.create_device(token, &new_device)).await?;

        let binding = StationBinding::new(
            StationId::from_code(prefix, device.id),
            device.display_name(prefix),
            hash,
        );
        self.write_binding(&binding, cancel).await?;
        info!("Registered new station {} (device {})", binding.station_id, device.id);
        Ok(StationResolution { binding, outcome: ResolutionOutcome::Registered, device })
    }

    /// [`resolve_station`](Self::resolve_station), degrading failures to
    /// [`StationState::Unbound`].
    pub async fn resolve_or_degrade(&self, token: &str, cancel: &CancellationToken) -> StationState {
        match self.resolve_station(token, cancel).await {
            Ok(resolution) => StationState::Bound(resolution),
            Err(e) => {
                warn!("Cannot register station: {}", e);
                StationState::Unbound { reason: e.to_string(), retryable: e.is_retryable() }
            },
        }
    }

    /// Collect and hash a fresh fingerprint.
    pub async fn fingerprint(&self) -> StationResult<Fingerprint> {
        let record = self.collector.collect().await;
        let hash = hash_record(&record, self.settings.hash_scope)?;
        Ok(Fingerprint { record, hash, scope: self.settings.hash_scope })
    }

    /// Compare the registry's hash for `device_id` with a fresh one.
    pub async fn prepare_hash_update(
        &self,
        token: &str,
        device_id: i64,
    ) -> StationResult<HashUpdateProposal> {
        let device = self
            .list_devices(token)
            .await?
            .into_iter()
            .find(|d| d.id == device_id)
            .ok_or(StationError::DeviceNotFound(device_id))?;
        let proposed = self.fingerprint().await?.hash;
        Ok(HashUpdateProposal { device, proposed })
    }

    /// Submit a confirmed hash update.
    ///
    /// When the local binding refers to the updated device it is replaced
    /// with one carrying the new hash.
    pub async fn apply_hash_update(
        &self,
        token: &str,
        update: ConfirmedHashUpdate,
    ) -> StationResult<Device> {
        let ConfirmedHashUpdate { device, proposed } = update;
        let body = DeviceHashUpdate { fingerprint_hash: proposed.clone() };
        let updated = self
            .registry
            .update_device_hash(token, device.id, &body)
            .await
            .map_err(admin_error)?;
        info!("Device {} hash updated to {}", device.id, proposed.short(HASH_LOG_LEN));

        let prefix = self.settings.prefix.as_str();
        if let Some(binding) = self.load_binding_lenient().await {
            if device.answers_to(&binding.station_id, prefix) {
                let rebound = StationBinding::new(binding.station_id, binding.station_name, proposed);
                self.store.save(&rebound).await?;
                debug!("Local binding for {} refreshed with new hash", rebound.station_id);
            }
        }
        Ok(updated)
    }

    pub async fn list_devices(&self, token: &str) -> StationResult<Vec<Device>> {
        self.registry.list_devices(token).await.map_err(admin_error)
    }

    pub async fn delete_device(&self, token: &str, id: i64) -> StationResult<()> {
        self.registry.delete_device(token, id).await.map_err(admin_error)?;
        info!("Device {} deleted", id);
        Ok(())
    }

    pub async fn current_binding(&self) -> StationResult<Option<StationBinding>> {
        Ok(self.store.load().await?)
    }

    /// Delete the local binding; the next resolution starts from scratch.
    pub async fn unbind(&self) -> StationResult<()> {
        self.store.clear().await?;
        info!("Local station binding cleared");
        Ok(())
    }

    /// A binding that cannot be read counts as absent.
    async fn load_binding_lenient(&self) -> Option<StationBinding> {
        match self.store.load().await {
            Ok(binding) => binding,
            Err(e) => {
                warn!("Ignoring unreadable station binding: {}", e);
                None
            },
        }
    }

    async fn write_binding(
        &self,
        binding: &StationBinding,
        cancel: &CancellationToken,
    ) -> StationResult<()> {
        ensure_live(cancel)?;
        self.store.save(binding).await?;
        Ok(())
    }
}

fn ensure_live(cancel: &CancellationToken) -> StationResult<()> {
    if cancel.is_cancelled() {
        return Err(StationError::Cancelled);
    }
    Ok(())
}

/// Race a registry call against cancellation.
async fn guarded<T, F>(cancel: &CancellationToken, call: F) -> StationResult<T>
where
    F: Future<Output = Result<T, RegistryError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(StationError::Cancelled),
        result = call => result.map_err(StationError::Initialization),
    }
}

fn admin_error(e: RegistryError) -> StationError {
    match e {
        RegistryError::DeviceNotFound { id } => StationError::DeviceNotFound(id),
        other => StationError::Registry(other),
    }
}

#[cfg(test)]
#[path = "station_tests.rs"]
mod tests;
