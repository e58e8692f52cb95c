//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions with an in-process store.
//! Session contents never reach the document database; losing a session
//! on restart only means signing in again.

use secrecy::{ExposeSecret, SecretString};
use tower_sessions::{
    Expiry, MemoryStore, Session, SessionManagerLayer, cookie::Key, service::SignedCookie,
};

use crate::models::{CurrentUser, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "km_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer.
///
/// `base_url` decides whether the cookie is marked Secure; the session
/// cookie is signed with a key derived from `secret` (config enforces a
/// minimum length for it).
#[must_use]
pub fn create_session_layer(
    base_url: &str,
    secret: &SecretString,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    let is_secure = base_url.starts_with("https://");
    let key = Key::derive_from(secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns the session-store error when the write fails.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the signed-in user from the session.
///
/// # Errors
///
/// Returns the session-store error when the write fails.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map(|_| ())
}
