//! Repositories over the hosted document store.
//!
//! # Collections
//!
//! - `users` - account records with Argon2id password hashes
//! - `carts` - one cart document per user, replaced wholesale on save
//! - `addresses` - shipping addresses captured at checkout
//! - `orders` - completed purchases (written here, read by the admin
//!   dashboard)
//!
//! Repositories borrow a `dyn DocumentStore` so the hosted backend and the
//! in-memory store are interchangeable.

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod users;

use kola_docstore::StoreError;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The underlying document-store call failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested record does not exist.
    #[error("Not found")]
    NotFound,

    /// A stored document did not fit its expected shape.
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}
