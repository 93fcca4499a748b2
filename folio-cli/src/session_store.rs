//! Login persistence on top of the settings store.

use async_trait::async_trait;
use folio_lib::auth::Session;
use folio_lib::auth::SessionStore;
use folio_lib::error::AuthError;

use crate::settings::SettingsError;
use crate::settings::SettingsProvider;

const SESSION_KEY: &str = "session";

/// Keeps the logged-in session under the `session` settings key.
pub struct SettingsSessionStore {
    settings: SettingsProvider,
}

impl SettingsSessionStore {
    pub fn new(settings: SettingsProvider) -> Self {
        Self { settings }
    }
}

fn storage_error(e: SettingsError) -> AuthError {
    match e {
        SettingsError::Deserialization(e) => AuthError::CorruptSession(e.to_string()),
        other => AuthError::Storage(other.to_string()),
    }
}

#[async_trait]
impl SessionStore for SettingsSessionStore {
    async fn load(&self) -> Result<Option<Session>, AuthError> {
        self.settings
            .get::<Session>(SESSION_KEY)
            .await
            .map_err(storage_error)
    }

    async fn save(&self, session: &Session) -> Result<(), AuthError> {
        self.settings
            .set(SESSION_KEY, session)
            .await
            .map_err(storage_error)
    }

    async fn clear(&self) -> Result<(), AuthError> {
        self.settings.delete(SESSION_KEY).await.map_err(storage_error)
    }
}
