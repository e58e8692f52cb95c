//! Address repository.

use chrono::Utc;

use kola_core::{Address, AddressId, UserId, collections};
use kola_docstore::{DocumentStore, Filter, to_fields};

use super::RepositoryError;

/// Repository for shipping addresses.
pub struct AddressRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All addresses for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Address>, RepositoryError> {
        let docs = self
            .store
            .query(
                collections::ADDRESSES,
                &[Filter::eq("userId", user_id.as_str())],
            )
            .await?;

        let mut addresses = Vec::with_capacity(docs.len());
        for doc in &docs {
            addresses.push(doc.decode::<Address>()?);
        }
        addresses.sort_by_key(|a| a.created_at);
        Ok(addresses)
    }

    /// The most recently created address for a user, if any.
    ///
    /// The payment page pre-fills delivery details from this.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn last_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Address>, RepositoryError> {
        let addresses = self.list_for_user(user_id).await?;
        Ok(addresses.into_iter().next_back())
    }

    /// Save a new address for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the insert fails.
    pub async fn create(
        &self,
        user_id: &UserId,
        mut address: Address,
    ) -> Result<Address, RepositoryError> {
        address.id = None;
        address.user_id = user_id.clone();
        address.created_at = Some(Utc::now());

        let doc = self
            .store
            .insert(collections::ADDRESSES, to_fields(&address)?)
            .await?;
        address.id = Some(AddressId::new(doc.id));

        Ok(address)
    }
}
