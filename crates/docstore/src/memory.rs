//! In-memory document store.
//!
//! Backs tests and local development with the same [`DocumentStore`]
//! surface as the hosted backend, plus watch streams for live snapshots.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use serde_json::{Map, Value};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::{Document, DocumentStore, Filter, StoreError};

/// Capacity of the mutation broadcast channel feeding watch streams.
const WATCH_CHANNEL_CAPACITY: usize = 64;

type Collections = HashMap<String, BTreeMap<String, Map<String, Value>>>;

/// In-process document store.
///
/// Cheaply cloneable; clones share the same data.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    collections: RwLock<Collections>,
    // Carries the name of the mutated collection.
    mutations: broadcast::Sender<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (mutations, _) = broadcast::channel(WATCH_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(HashMap::new()),
                mutations,
            }),
        }
    }

    /// Watch a collection as a lazy, unbounded stream of snapshots.
    ///
    /// The stream yields the current matching documents immediately, then
    /// a fresh snapshot after every mutation of the collection. Dropping
    /// the stream cancels the subscription.
    pub fn watch(
        &self,
        collection: &str,
        filters: Vec<Filter>,
    ) -> impl Stream<Item = Vec<Document>> + Send + use<> {
        let inner = Arc::clone(&self.inner);
        let collection = collection.to_owned();
        // Subscribe before the initial snapshot so no mutation is missed.
        let mut rx = inner.mutations.subscribe();

        async_stream::stream! {
            yield snapshot(&inner, &collection, &filters).await;

            loop {
                match rx.recv().await {
                    Ok(mutated) if mutated == collection => {
                        yield snapshot(&inner, &collection, &filters).await;
                    }
                    Ok(_) => {}
                    // Missed events collapse into one fresh snapshot.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        yield snapshot(&inner, &collection, &filters).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    fn notify(&self, collection: &str) {
        // Send only fails when no watcher is subscribed.
        let _ = self.inner.mutations.send(collection.to_owned());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn snapshot(inner: &Inner, collection: &str, filters: &[Filter]) -> Vec<Document> {
    let collections = inner.collections.read().await;
    collections
        .get(collection)
        .map(|docs| {
            docs.iter()
                .filter(|(_, fields)| filters.iter().all(|f| f.matches(fields)))
                .map(|(id, fields)| Document {
                    id: id.clone(),
                    fields: fields.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().to_string();
        {
            let mut collections = self.inner.collections.write().await;
            collections
                .entry(collection.to_owned())
                .or_default()
                .insert(id.clone(), fields.clone());
        }
        self.notify(collection);
        Ok(Document { id, fields })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.inner.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_owned(),
                fields: fields.clone(),
            }))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        {
            let mut collections = self.inner.collections.write().await;
            collections
                .entry(collection.to_owned())
                .or_default()
                .insert(id.to_owned(), fields);
        }
        self.notify(collection);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        {
            let mut collections = self.inner.collections.write().await;
            let docs = collections
                .get_mut(collection)
                .ok_or(StoreError::NotFound)?;
            let existing = docs.get_mut(id).ok_or(StoreError::NotFound)?;
            *existing = fields;
        }
        self.notify(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        {
            let mut collections = self.inner.collections.write().await;
            if let Some(docs) = collections.get_mut(collection) {
                docs.remove(id);
            }
        }
        self.notify(collection);
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(snapshot(&self.inner, collection, &[]).await)
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        Ok(snapshot(&self.inner, collection, filters).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let store = MemoryStore::new();
        let doc = store
            .insert("orders", fields(json!({"reference": "KM-1"})))
            .await
            .expect("insert");

        let fetched = store.get("orders", &doc.id).await.expect("get");
        assert_eq!(fetched, Some(doc));
    }

    #[tokio::test]
    async fn test_query_is_conjunction() {
        let store = MemoryStore::new();
        for (user, status) in [("u-1", "completed"), ("u-1", "pending"), ("u-2", "completed")] {
            store
                .insert("orders", fields(json!({"userId": user, "status": status})))
                .await
                .expect("insert");
        }

        let both = store
            .query(
                "orders",
                &[Filter::eq("userId", "u-1"), Filter::eq("status", "completed")],
            )
            .await
            .expect("query");
        assert_eq!(both.len(), 1);

        let by_user = store
            .query("orders", &[Filter::eq("userId", "u-1")])
            .await
            .expect("query");
        assert_eq!(by_user.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("orders", "missing", fields(json!({})))
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryStore::new();
        store.delete("orders", "missing").await.expect("no-op delete");
    }

    #[tokio::test]
    async fn test_set_creates_then_replaces() {
        let store = MemoryStore::new();
        store
            .set("dashboard", "settings", fields(json!({"ownerName": "Ada"})))
            .await
            .expect("set");
        store
            .set("dashboard", "settings", fields(json!({"ownerName": "Obi"})))
            .await
            .expect("set");

        let doc = store
            .get("dashboard", "settings")
            .await
            .expect("get")
            .expect("present");
        assert_eq!(doc.fields.get("ownerName"), Some(&json!("Obi")));
    }

    #[tokio::test]
    async fn test_watch_emits_initial_then_per_mutation() {
        let store = MemoryStore::new();
        store
            .insert("carts", fields(json!({"userId": "u-1", "items": []})))
            .await
            .expect("insert");

        let mut stream =
            Box::pin(store.watch("carts", vec![Filter::eq("userId", "u-1")]));

        let initial = stream.next().await.expect("initial snapshot");
        assert_eq!(initial.len(), 1);

        store
            .insert("carts", fields(json!({"userId": "u-1", "items": [1]})))
            .await
            .expect("insert");
        let updated = stream.next().await.expect("snapshot after mutation");
        assert_eq!(updated.len(), 2);

        // Mutations in other collections do not wake this watcher; the
        // next cart mutation does.
        store
            .insert("orders", fields(json!({"userId": "u-1"})))
            .await
            .expect("insert");
        store
            .insert("carts", fields(json!({"userId": "u-2"})))
            .await
            .expect("insert");
        let still_filtered = stream.next().await.expect("snapshot");
        assert_eq!(still_filtered.len(), 2);
    }
}
