//! Process-local settings.

use async_trait::async_trait;
use dashmap::DashMap;

use super::SettingsBackend;
use super::SettingsError;

/// Settings that vanish with the process.
///
/// Used when no data directory is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), SettingsError> {
        self.entries.insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.entries.remove(key);
        Ok(())
    }
}
