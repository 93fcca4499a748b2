//! Bearer tokens issued at login.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// A session bearer token with an optional expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The opaque token value.
    pub access_token: String,
    /// When the token expires, if it does.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token that never expires.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a token with an expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Generates a random token valid for `ttl`, or forever if `None`.
    pub fn generate(ttl: Option<Duration>) -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 32] = rng.random();
        Self {
            access_token: URL_SAFE_NO_PAD.encode(bytes),
            expires_at: ttl.map(|ttl| Utc::now() + ttl),
        }
    }

    /// A token without an expiry never expires.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    pub fn expires_within(&self, duration: Duration) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// `Authorization` header value for the token.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_differ() {
        let a = AccessToken::generate(None);
        let b = AccessToken::generate(None);
        assert_ne!(a.access_token, b.access_token);
        assert_eq!(a.access_token.len(), 43);
        assert!(!a.is_expired());
    }

    #[test]
    fn test_expiry() {
        let past = AccessToken::with_expiry("t", Utc::now() - Duration::seconds(1));
        assert!(past.is_expired());
        let soon = AccessToken::generate(Some(Duration::minutes(5)));
        assert!(!soon.is_expired());
        assert!(soon.expires_within(Duration::minutes(10)));
        assert!(!soon.expires_within(Duration::minutes(1)));
        assert_eq!(AccessToken::new("abc").as_bearer(), "Bearer abc");
    }
}
