//! Preferences persisted in a single SQLite file.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rusqlite::OptionalExtension;

use super::SettingsBackend;
use super::SettingsError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (
    name TEXT PRIMARY KEY,
    payload BLOB NOT NULL,
    changed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// SQLite storage fronted by a read-through cache.
///
/// Every key the shell touches (page sizes, the session) is read on start
/// and on each screen change, so reads are served from memory after the
/// first hit.
pub struct SqliteBackend {
    client: Client,
    cached: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open the preferences file, creating it and its table if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        debug!("Opening preferences at {}", path.display());

        let client = ClientBuilder::new().path(path).open().await?;
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;

        Ok(Self {
            client,
            cached: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(hit) = self.cached.get(key) {
            return Ok(Some(hit.clone()));
        }

        let name = key.to_owned();
        let payload: Option<Vec<u8>> = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT payload FROM preferences WHERE name = ?1",
                    [&name],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        if let Some(bytes) = &payload {
            self.cached.insert(key.to_owned(), bytes.clone());
        }
        Ok(payload)
    }

    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), SettingsError> {
        let name = key.to_owned();
        let payload = bytes.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO preferences (name, payload) VALUES (?1, ?2)
                     ON CONFLICT(name) DO UPDATE
                     SET payload = excluded.payload, changed_at = CURRENT_TIMESTAMP",
                    rusqlite::params![name, payload],
                )
            })
            .await?;

        debug!("Stored preference '{}' ({} bytes)", key, bytes.len());
        self.cached.insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let name = key.to_owned();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM preferences WHERE name = ?1", [&name]))
            .await?;

        self.cached.remove(key);
        Ok(())
    }
}
