//! Device registry seam.

use async_trait::async_trait;
use rxstation_client::RegistryClient;
use rxstation_types::models::{Device, DeviceHashUpdate, NewDevice};
use rxstation_types::RegistryError;

/// Remote device registry operations used by the binder.
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Every registered device, across all pages.
    async fn list_devices(&self, token: &str) -> Result<Vec<Device>, RegistryError>;

    async fn create_device(&self, token: &str, device: &NewDevice)
        -> Result<Device, RegistryError>;

    async fn update_device_hash(
        &self,
        token: &str,
        id: i64,
        update: &DeviceHashUpdate,
    ) -> Result<Device, RegistryError>;

    async fn delete_device(&self, token: &str, id: i64) -> Result<(), RegistryError>;
}

#[async_trait]
impl DeviceRegistry for RegistryClient {
    async fn list_devices(&self, token: &str) -> Result<Vec<Device>, RegistryError> {
        RegistryClient::list_devices(self, token).await.map_err(RegistryError::from)
    }

    async fn create_device(
        &self,
        token: &str,
        device: &NewDevice,
    ) -> Result<Device, RegistryError> {
        RegistryClient::create_device(self, token, device).await.map_err(RegistryError::from)
    }

    async fn update_device_hash(
        &self,
        token: &str,
        id: i64,
        update: &DeviceHashUpdate,
    ) -> Result<Device, RegistryError> {
        RegistryClient::update_device_hash(self, token, id, update)
            .await
            .map_err(RegistryError::from)
    }

    async fn delete_device(&self, token: &str, id: i64) -> Result<(), RegistryError> {
        RegistryClient::delete_device(self, token, id).await.map_err(RegistryError::from)
    }
}
