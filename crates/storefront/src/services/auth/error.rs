//! Authentication error types.

use kola_core::EmailError;

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The supplied email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The supplied password fails the policy.
    #[error("{0}")]
    WeakPassword(String),

    /// An account with this email already exists.
    #[error("account already exists")]
    UserAlreadyExists,

    /// Wrong email or password. Deliberately does not say which.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The underlying repository call failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
