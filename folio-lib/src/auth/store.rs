//! Session persistence.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Session;
use crate::error::AuthError;

/// Where a logged-in session survives restarts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session. `Err` means stored data exists but is
    /// unusable.
    async fn load(&self) -> Result<Option<Session>, AuthError>;

    async fn save(&self, session: &Session) -> Result<(), AuthError>;

    async fn clear(&self) -> Result<(), AuthError>;
}

/// Keeps the session as serialized JSON in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with raw serialized data.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw serialized session, if any.
    pub async fn raw(&self) -> Option<String> {
        self.raw.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, AuthError> {
        let raw = self.raw.lock().await;
        match raw.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session).map_err(|e| AuthError::Storage(e.to_string()))?;
        *self.raw.lock().await = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        *self.raw.lock().await = None;
        Ok(())
    }
}
