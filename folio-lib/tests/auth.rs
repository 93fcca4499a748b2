//! Login, logout and session restore.

use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use folio_lib::auth::AccessToken;
use folio_lib::auth::AuthSession;
use folio_lib::auth::Credentials;
use folio_lib::auth::MemorySessionStore;
use folio_lib::auth::Session;
use folio_lib::auth::SessionStore;
use folio_lib::auth::StaticAuthenticator;
use folio_lib::error::AuthError;
use folio_lib::sample;

fn session_with(store: Arc<MemorySessionStore>) -> AuthSession {
    let authenticator = sample::demo_authenticator().expect("demo account");
    AuthSession::new(Arc::new(authenticator), store)
}

fn demo() -> Credentials {
    Credentials::new(sample::DEMO_USERNAME, sample::DEMO_PASSWORD)
}

#[tokio::test]
async fn test_login_and_logout() {
    let store = Arc::new(MemorySessionStore::new());
    let mut auth = session_with(store.clone());
    assert!(!auth.is_authenticated());
    assert!(auth.current_user().is_none());

    let user = auth.login(demo()).await.expect("login");
    assert_eq!(user.username, "demo");
    assert_eq!(user.email, "demo@example.com");
    assert!(auth.is_authenticated());
    assert!(auth.bearer().is_some_and(|b| b.starts_with("Bearer ")));
    assert!(store.raw().await.is_some());

    auth.logout().await.expect("logout");
    assert!(!auth.is_authenticated());
    assert!(auth.bearer().is_none());
    assert!(store.raw().await.is_none());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let store = Arc::new(MemorySessionStore::new());
    let mut auth = session_with(store.clone());

    let err = auth
        .login(Credentials::new("demo", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    let err = auth
        .login(Credentials::new("nobody", "folio"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(!auth.is_authenticated());
    assert!(store.raw().await.is_none());
}

#[tokio::test]
async fn test_empty_credentials() {
    let mut auth = session_with(Arc::new(MemorySessionStore::new()));
    let err = auth.login(Credentials::new("  ", "x")).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
    let err = auth.login(Credentials::new("demo", "")).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
}

#[tokio::test]
async fn test_failed_login_keeps_existing_session() {
    let mut auth = session_with(Arc::new(MemorySessionStore::new()));
    let id = auth.login(demo()).await.expect("login").id;
    assert!(auth.login(Credentials::new("demo", "nope")).await.is_err());
    assert_eq!(auth.current_user().map(|u| u.id), Some(id));
}

#[tokio::test]
async fn test_restore_persisted_session() {
    let store = Arc::new(MemorySessionStore::new());
    let mut first = session_with(store.clone());
    let id = first.login(demo()).await.expect("login").id;

    let mut second = session_with(store.clone());
    let restored = second.restore().await.map(|u| u.id);
    assert_eq!(restored, Some(id));
    assert!(second.is_authenticated());
}

#[tokio::test]
async fn test_restore_discards_unreadable_data() {
    let store = Arc::new(MemorySessionStore::with_raw("{not json"));
    assert!(matches!(
        store.load().await,
        Err(AuthError::CorruptSession(_))
    ));

    let mut auth = session_with(store.clone());
    assert!(auth.restore().await.is_none());
    assert!(!auth.is_authenticated());
    assert!(store.raw().await.is_none());
}

#[tokio::test]
async fn test_restore_discards_expired_session() {
    let store = Arc::new(MemorySessionStore::new());
    let authenticator = StaticAuthenticator::new();
    let user = authenticator
        .register("sam", "Sam", "sam@example.com", "secret")
        .expect("register");
    let expired = Session {
        user,
        token: AccessToken::with_expiry("stale", Utc::now() - Duration::minutes(1)),
    };
    store.save(&expired).await.expect("save");

    let mut auth = AuthSession::new(Arc::new(authenticator), store.clone());
    assert!(auth.restore().await.is_none());
    assert!(store.raw().await.is_none());
}

#[tokio::test]
async fn test_restore_with_nothing_stored() {
    let mut auth = session_with(Arc::new(MemorySessionStore::new()));
    assert!(auth.restore().await.is_none());
}

#[test]
fn test_register_validation() {
    let authenticator = StaticAuthenticator::new();
    assert!(matches!(
        authenticator.register("ann", "Ann", "not-an-email", "pw"),
        Err(AuthError::InvalidEmail { .. })
    ));
    authenticator
        .register("ann", "Ann", "ann@example.com", "pw")
        .expect("register");
    assert!(matches!(
        authenticator.register("ann", "Ann Again", "ann2@example.com", "pw"),
        Err(AuthError::AccountExists { .. })
    ));
    assert!(matches!(
        authenticator.register("", "Nobody", "x@example.com", "pw"),
        Err(AuthError::MissingCredentials)
    ));
    assert_eq!(authenticator.len(), 1);
}

#[tokio::test]
async fn test_token_ttl_is_applied() {
    let authenticator = StaticAuthenticator::new().with_token_ttl(None);
    authenticator
        .register("kim", "Kim", "kim@example.com", "pw")
        .expect("register");
    let mut auth = AuthSession::new(Arc::new(authenticator), Arc::new(MemorySessionStore::new()));
    auth.login(Credentials::new("kim", "pw")).await.expect("login");
    assert!(auth.is_authenticated());
}
