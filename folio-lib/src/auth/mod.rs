//! Authentication and session state.
//!
//! [`AuthSession`] is the login guard's view of who is signed in. It asks an
//! [`Authenticator`] to verify credentials, and mirrors the resulting
//! [`Session`] into a [`SessionStore`] so that a restart can pick it up again
//! with [`AuthSession::restore`].

mod authenticator;
mod store;
mod token;

use std::fmt;
use std::sync::Arc;

use log::info;
use log::warn;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AuthError;

pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_TOKEN_TTL_HOURS;
pub use authenticator::StaticAuthenticator;
pub use store::MemorySessionStore;
pub use store::SessionStore;
pub use token::AccessToken;

/// Username and password as typed at the login prompt.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Display name.
    pub name: String,
    pub email: String,
}

/// A user together with the token issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: AccessToken,
}

/// Current authentication state of the application.
pub struct AuthSession {
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn SessionStore>,
    current: Option<Session>,
}

impl AuthSession {
    /// Creates a signed-out session. Call [`AuthSession::restore`] to pick up
    /// a persisted login.
    pub fn new(authenticator: Arc<dyn Authenticator>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            authenticator,
            store,
            current: None,
        }
    }

    /// Returns `true` while a user is signed in with an unexpired token.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|session| !session.token.is_expired())
    }

    /// The signed-in user, if the session is still valid.
    pub fn current_user(&self) -> Option<&User> {
        if self.is_authenticated() {
            self.current.as_ref().map(|session| &session.user)
        } else {
            None
        }
    }

    /// Authorization header value for the signed-in user.
    pub fn bearer(&self) -> Option<String> {
        if self.is_authenticated() {
            self.current.as_ref().map(|session| session.token.as_bearer())
        } else {
            None
        }
    }

    /// Verifies credentials, then stores and persists the new session.
    ///
    /// A failed login leaves any existing session untouched.
    pub async fn login(&mut self, credentials: Credentials) -> Result<&User, AuthError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let session = self.authenticator.authenticate(&credentials).await?;
        self.store.save(&session).await?;
        info!("Logged in as '{}'", session.user.username);
        Ok(&self.current.insert(session).user)
    }

    /// Signs out and removes the persisted session.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let previous = self.current.take();
        self.store.clear().await?;
        if let Some(session) = previous {
            info!("Logged out '{}'", session.user.username);
        }
        Ok(())
    }

    /// Picks up a persisted session.
    ///
    /// Unreadable or expired data is discarded, leaving the application
    /// signed out.
    pub async fn restore(&mut self) -> Option<&User> {
        match self.store.load().await {
            Ok(Some(session)) if !session.token.is_expired() => {
                info!("Restored session for '{}'", session.user.username);
                self.current = Some(session);
            }
            Ok(Some(session)) => {
                info!("Stored session for '{}' expired", session.user.username);
                self.discard().await;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Discarding stored session: {}", e);
                self.discard().await;
            }
        }
        self.current_user()
    }

    async fn discard(&mut self) {
        self.current = None;
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored session: {}", e);
        }
    }
}
