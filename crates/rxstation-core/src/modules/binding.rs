//! Local station binding persistence.
//!
//! One binding per data directory. Writes go through a temp file and a
//! rename so readers never observe a torn file.

use async_trait::async_trait;
use rxstation_types::models::StationBinding;
use rxstation_types::BindingError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[async_trait]
pub trait BindingStore: Send + Sync {
    /// `Ok(None)` when no binding exists.
    async fn load(&self) -> Result<Option<StationBinding>, BindingError>;

    /// Replace the binding wholesale.
    async fn save(&self, binding: &StationBinding) -> Result<(), BindingError>;

    /// Remove the binding. Clearing an absent binding is not an error.
    async fn clear(&self) -> Result<(), BindingError>;
}

/// JSON file store.
pub struct FileBindingStore {
    path: PathBuf,
}

impl FileBindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl BindingStore for FileBindingStore {
    async fn load(&self) -> Result<Option<StationBinding>, BindingError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BindingError::from_io_error(&e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| BindingError::Corrupt { message: e.to_string() })
    }

    async fn save(&self, binding: &StationBinding) -> Result<(), BindingError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BindingError::from_io_error(&e))?;
        }
        let content = serde_json::to_string_pretty(binding)
            .map_err(|e| BindingError::StorageError { message: e.to_string() })?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| BindingError::from_io_error(&e))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| BindingError::from_io_error(&e))?;

        tracing::debug!("Binding for station {} written to {}", binding.station_id, self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), BindingError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BindingError::from_io_error(&e)),
        }
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Default)]
pub struct MemoryBindingStore {
    binding: Mutex<Option<StationBinding>>,
    writes: AtomicUsize,
}

impl MemoryBindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(binding: StationBinding) -> Self {
        Self { binding: Mutex::new(Some(binding)), writes: AtomicUsize::new(0) }
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn current(&self) -> Option<StationBinding> {
        self.binding.lock().await.clone()
    }
}

#[async_trait]
impl BindingStore for MemoryBindingStore {
    async fn load(&self) -> Result<Option<StationBinding>, BindingError> {
        Ok(self.binding.lock().await.clone())
    }

    async fn save(&self, binding: &StationBinding) -> Result<(), BindingError> {
        *self.binding.lock().await = Some(binding.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), BindingError> {
        *self.binding.lock().await = None;
        Ok(())
    }
}
