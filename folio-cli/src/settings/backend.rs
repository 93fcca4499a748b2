//! Storage seam under [`SettingsProvider`](super::SettingsProvider).

use async_trait::async_trait;

use super::SettingsError;

/// Byte-level key/value storage for preferences.
///
/// Encoding is the provider's job; a backend only keeps opaque blobs.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or overwrite `key`.
    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), SettingsError>;

    /// Removing a key that does not exist succeeds.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
