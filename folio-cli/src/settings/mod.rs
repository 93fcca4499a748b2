//! Typed preferences: page sizes per table and the persisted login.
//!
//! Values are encoded with bincode by [`SettingsProvider`] and kept as
//! opaque blobs by a [`SettingsBackend`].

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("preferences database: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("could not encode preference: {0}")]
    Serialization(bincode::Error),
    /// The stored bytes do not decode as the requested type.
    #[error("stored preference is unreadable: {0}")]
    Deserialization(bincode::Error),
}

/// Cheaply cloneable handle to the preference store.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Read and decode `key`. `Ok(None)` when it was never written.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.load(key).await? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(SettingsError::Deserialization)
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.store(key, bytes).await
    }

    /// Write bytes exactly as given.
    pub async fn set_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), SettingsError> {
        self.backend.store(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}
