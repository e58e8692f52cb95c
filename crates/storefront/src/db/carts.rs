//! Cart repository.

use chrono::Utc;

use kola_core::{Cart, CartId, CartItem, UserId, collections};
use kola_docstore::{DocumentStore, to_fields};

use super::RepositoryError;

/// Repository for user carts.
///
/// The cart document is keyed on the user id, so at most one cart exists
/// per user even under concurrent saves; saves replace the item list
/// wholesale, matching the way the checkout flow consumes it.
pub struct CartRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// The user's cart document, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn get_for_user(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        match self.store.get(collections::CARTS, user_id.as_str()).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// The user's cart items; an absent cart reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn items_for_user(&self, user_id: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(self
            .get_for_user(user_id)
            .await?
            .map(|cart| cart.items)
            .unwrap_or_default())
    }

    /// Create-or-replace the user's cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    pub async fn save_items(
        &self,
        user_id: &UserId,
        items: Vec<CartItem>,
    ) -> Result<Cart, RepositoryError> {
        let cart = Cart {
            id: Some(CartId::new(user_id.as_str())),
            user_id: user_id.clone(),
            items,
            updated_at: Some(Utc::now()),
        };

        self.store
            .set(collections::CARTS, user_id.as_str(), to_fields(&cart)?)
            .await?;

        Ok(cart)
    }

    /// Empty the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.save_items(user_id, Vec::new()).await?;
        Ok(())
    }
}
