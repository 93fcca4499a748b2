//! Credential verification.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use email_address::EmailAddress;
use log::debug;
use sha2::Digest;
use sha2::Sha256;
use uuid::Uuid;

use super::AccessToken;
use super::Credentials;
use super::Session;
use super::User;
use crate::error::AuthError;

/// Lifetime of tokens issued by [`StaticAuthenticator`] unless configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 8;

/// Verifies credentials and issues a session.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the authenticated user with a fresh token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

#[derive(Debug)]
struct Account {
    user: User,
    password_digest: String,
}

/// Authenticates against accounts registered in memory.
///
/// Passwords are kept only as salted SHA-256 digests.
#[derive(Debug)]
pub struct StaticAuthenticator {
    accounts: DashMap<String, Account>,
    token_ttl: Option<Duration>,
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            token_ttl: Some(Duration::hours(DEFAULT_TOKEN_TTL_HOURS)),
        }
    }

    /// Sets the lifetime of issued tokens. `None` issues non-expiring tokens.
    pub fn with_token_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Registers an account.
    pub fn register(
        &self,
        username: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if !EmailAddress::is_valid(email) {
            return Err(AuthError::InvalidEmail {
                email: email.to_string(),
            });
        }

        match self.accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::AccountExists {
                username: username.to_string(),
            }),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                };
                slot.insert(Account {
                    user: user.clone(),
                    password_digest: password_digest(username, password),
                });
                Ok(user)
            }
        }
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let account = self
            .accounts
            .get(&credentials.username)
            .ok_or(AuthError::InvalidCredentials)?;

        if account.password_digest != password_digest(&credentials.username, &credentials.password)
        {
            debug!("Password mismatch for '{}'", credentials.username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Session {
            user: account.user.clone(),
            token: AccessToken::generate(self.token_ttl),
        })
    }
}

fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    STANDARD.encode(hasher.finalize())
}
