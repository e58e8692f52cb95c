//! Order repository.

use std::cmp::Reverse;

use kola_core::{Order, OrderId, UserId, collections};
use kola_docstore::{DocumentStore, Filter, to_fields};

use super::RepositoryError;

/// Repository for completed orders.
///
/// Orders are write-once: checkout inserts them and nothing updates them
/// afterwards.
pub struct OrderRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the insert fails.
    pub async fn create(&self, mut order: Order) -> Result<Order, RepositoryError> {
        order.id = None;
        let doc = self
            .store
            .insert(collections::ORDERS, to_fields(&order)?)
            .await?;
        order.id = Some(OrderId::new(doc.id));
        Ok(order)
    }

    /// A user's orders, newest first. Undated orders sort last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let docs = self
            .store
            .query(
                collections::ORDERS,
                &[Filter::eq("userId", user_id.as_str())],
            )
            .await?;

        let mut orders = Vec::with_capacity(docs.len());
        for doc in &docs {
            orders.push(doc.decode::<Order>()?);
        }
        orders.sort_by_key(|o| Reverse(o.created_at_or_epoch()));
        Ok(orders)
    }
}
