//! Session-related types.
//!
//! Types stored in the session for authentication state. The session is
//! the only place the logged-in user lives; handlers receive it through
//! the `RequireAuth` extractor rather than ambient globals.

use serde::{Deserialize, Serialize};

use kola_core::{Email, UserId, UserRecord};

/// Session-stored user identity.
///
/// A denormalized snapshot of the account at sign-in time; it can go
/// stale relative to the stored record and is refreshed only by signing
/// in again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's document ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
}

impl CurrentUser {
    /// Snapshot a stored account into the session shape.
    ///
    /// Returns `None` when the record has not been persisted yet (no ID).
    #[must_use]
    pub fn from_record(user: &UserRecord) -> Option<Self> {
        Some(Self {
            id: user.id.clone()?,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
