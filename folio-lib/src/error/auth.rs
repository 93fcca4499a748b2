//! Authentication error types

/// Errors that can occur while logging in or managing a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username or password was empty.
    #[error("Username and password are required")]
    MissingCredentials,

    /// An account with this username is already registered.
    #[error("Account already exists: {username}")]
    AccountExists { username: String },

    /// The email address is not valid.
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    /// The session token has expired.
    #[error("Session expired")]
    SessionExpired,

    /// Persisted session data could not be read back.
    #[error("Stored session is unreadable: {0}")]
    CorruptSession(String),

    /// The session store failed.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::CorruptSession(e.to_string())
    }
}
