use crate::error::ClientError;
use crate::retry::jittered_delay;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use rxstation_types::models::{Device, DeviceHashUpdate, DevicePage, NewDevice, RegistryConfig};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

const DEVICES_PATH: &str = "/api/device-fingerprints";
/// Upper bound on pages walked by one listing.
const MAX_PAGES: u32 = 10_000;

pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("rxstation/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch every registered device, walking all pages.
    pub async fn list_devices(&self, token: &str) -> Result<Vec<Device>, ClientError> {
        let mut devices = Vec::new();
        let mut page = 0u32;

        loop {
            let batch = self.with_retry("list_devices", || self.list_page_once(token, page)).await?;
            if batch.is_stale(page) {
                tracing::warn!("Registry ignored page {}, stopping listing", page);
                break;
            }
            let last = batch.is_last(page, self.config.page_size);
            devices.extend(batch.into_devices());
            if last {
                break;
            }
            page += 1;
            if page >= MAX_PAGES {
                tracing::warn!("Device listing stopped after {} pages", MAX_PAGES);
                break;
            }
        }

        tracing::debug!("Fetched {} devices over {} page(s)", devices.len(), page + 1);
        Ok(devices)
    }

    pub async fn create_device(
        &self,
        token: &str,
        device: &NewDevice,
    ) -> Result<Device, ClientError> {
        let url = if self.config.auto_register {
            self.url(&format!("{}/auto-register", DEVICES_PATH))
        } else {
            self.url(&format!("{}/", DEVICES_PATH))
        };
        // Not retried: a create that timed out may still have landed.
        let resp = self.send(self.authorized(self.client.post(url), token).json(device)).await?;
        Self::decode(Self::check(resp, None).await?).await
    }

    pub async fn update_device_hash(
        &self,
        token: &str,
        id: i64,
        update: &DeviceHashUpdate,
    ) -> Result<Device, ClientError> {
        let url = self.url(&format!("{}/{}/", DEVICES_PATH, id));
        let url = url.as_str();
        self.with_retry("update_device_hash", || async move {
            let resp = self.send(self.authorized(self.client.put(url), token).json(update)).await?;
            Self::decode(Self::check(resp, Some(id)).await?).await
        })
        .await
    }

    pub async fn delete_device(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("{}/{}", DEVICES_PATH, id));
        let url = url.as_str();
        self.with_retry("delete_device", || async move {
            let resp = self.send(self.authorized(self.client.delete(url), token)).await?;
            Self::check(resp, Some(id)).await.map(drop)
        })
        .await
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    async fn list_page_once(&self, token: &str, page: u32) -> Result<DevicePage, ClientError> {
        let request = self
            .authorized(self.client.get(self.url(DEVICES_PATH)), token)
            .query(&[("page", page), ("size", self.config.page_size)]);
        let resp = self.send(request).await?;
        Self::decode(Self::check(resp, None).await?).await
    }

    async fn with_retry<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let retry = self.config.retry;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempts <= retry.max_retries => {
                    let wait = match &e {
                        ClientError::RateLimited { retry_after: Some(secs) } => {
                            Duration::from_secs(*secs).min(Duration::from_millis(retry.max_delay_ms))
                        },
                        _ => jittered_delay(&retry, attempts),
                    };
                    tracing::debug!(
                        "{} failed ({}), retrying in {:?} (attempt {})",
                        operation,
                        e,
                        wait,
                        attempts
                    );
                    tokio::time::sleep(wait).await;
                },
                Err(e) => {
                    if e.is_transient() {
                        tracing::warn!("{} gave up after {} attempts: {}", operation, attempts, e);
                    }
                    return Err(e);
                },
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        request
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, self.config.timeout_secs))
    }

    async fn check(resp: Response, device_id: Option<i64>) -> Result<Response, ClientError> {
        let status = resp.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(ClientError::RateLimited { retry_after });
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = device_id {
                return Err(ClientError::NotFound(id));
            }
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError { status: status.as_u16(), message });
        }

        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let body = resp.bytes().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
