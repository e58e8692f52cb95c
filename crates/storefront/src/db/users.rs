//! User repository.

use chrono::Utc;

use kola_core::{Email, UserId, UserRecord, collections};
use kola_docstore::{DocumentStore, Filter, to_fields};

use super::RepositoryError;

/// Repository for user account records.
pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails or a stored
    /// record cannot be decoded.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<UserRecord>, RepositoryError> {
        let docs = self
            .store
            .query(collections::USERS, &[Filter::eq("email", email.as_str())])
            .await?;

        match docs.first() {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the fetch fails.
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        let doc = self.store.get(collections::USERS, id.as_str()).await?;
        match doc {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Create a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<UserRecord, RepositoryError> {
        if self.get_by_email(email).await?.is_some() {
            return Err(RepositoryError::Conflict(
                "email already registered".to_owned(),
            ));
        }

        let now = Utc::now();
        let mut user = UserRecord {
            id: None,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.clone(),
            password_hash: password_hash.to_owned(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let doc = self
            .store
            .insert(collections::USERS, to_fields(&user)?)
            .await?;
        user.id = Some(UserId::new(doc.id));

        Ok(user)
    }
}
