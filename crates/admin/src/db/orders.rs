//! Wholesale order reads for reporting.

use kola_core::{Order, collections};
use kola_docstore::{DocumentStore, StoreError};

/// Repository for report-wide order snapshots.
pub struct OrderSnapshotRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderSnapshotRepository<'a> {
    /// Create a new order snapshot repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Every order in the store.
    ///
    /// Documents that fail to decode even leniently are logged and
    /// skipped; one bad record must not take the dashboard down.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the listing itself fails.
    pub async fn all(&self) -> Result<Vec<Order>, StoreError> {
        let docs = self.store.list(collections::ORDERS).await?;

        let mut orders = Vec::with_capacity(docs.len());
        for doc in &docs {
            match doc.decode::<Order>() {
                Ok(order) => orders.push(order),
                Err(err) => {
                    tracing::warn!(document_id = %doc.id, error = %err, "Skipping undecodable order");
                }
            }
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kola_docstore::MemoryStore;
    use serde_json::{Map, json};

    fn fields(value: serde_json::Value) -> Map<String, serde_json::Value> {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("test fixtures are objects"),
        }
    }

    #[tokio::test]
    async fn test_bad_document_is_skipped_not_fatal() {
        let store = MemoryStore::new();
        store
            .insert(
                collections::ORDERS,
                fields(json!({"userId": "u-1", "totalPrice": "12.50"})),
            )
            .await
            .expect("insert");
        // No userId at all: undecodable
        store
            .insert(collections::ORDERS, fields(json!({"totalPrice": 3})))
            .await
            .expect("insert");

        let repo = OrderSnapshotRepository::new(&store);
        let orders = repo.all().await.expect("list");
        assert_eq!(orders.len(), 1);
    }
}
