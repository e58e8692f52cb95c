//! Kola Market document-store gateway.
//!
//! The whole system persists through a hosted document database exposing
//! collection-scoped CRUD and simple equality-filtered queries. This crate
//! owns that boundary:
//!
//! - [`DocumentStore`] - the gateway trait every repository is written
//!   against
//! - [`RestStore`] - reqwest client for the hosted HTTP document API
//! - [`MemoryStore`] - in-process implementation for tests and local
//!   development, including watch streams for live snapshots
//!
//! Documents are schemaless JSON objects with store-assigned string IDs;
//! typed decoding into domain models happens at the repository layer via
//! [`Document::decode`].

#![cfg_attr(not(test), forbid(unsafe_code))]

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::{RestConfig, RestStore};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Errors from document-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested document does not exist.
    #[error("document not found")]
    NotFound,

    /// The backend rejected the request.
    #[error("document API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error body or status text.
        message: String,
    },

    /// The request never produced a response.
    #[error("document store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A stored document could not be decoded into the expected model.
    #[error("failed to decode document {id}: {source}")]
    Decode {
        /// ID of the offending document.
        id: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// Document fields must be a JSON object.
    #[error("document fields must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A stored document: store-assigned ID plus its JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned ID, unique within the collection.
    pub id: String,
    /// Top-level fields.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Decode the fields into a typed model, injecting the document ID
    /// under the `"id"` key the way the backend's own clients do.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] when the fields do not fit the
    /// target type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_owned(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|source| StoreError::Decode {
            id: self.id.clone(),
            source,
        })
    }
}

/// An equality filter on a top-level document field.
///
/// Queries apply filters as a conjunction.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

impl Filter {
    /// Build an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether a document's fields satisfy this filter.
    #[must_use]
    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

/// Serialize a model into document fields, dropping any `"id"` key so the
/// store-assigned ID stays authoritative.
///
/// # Errors
///
/// Returns [`StoreError::NotAnObject`] when the model does not serialize
/// to a JSON object.
pub fn to_fields<T: serde::Serialize>(model: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(model) {
        Ok(Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        Ok(other) => Err(StoreError::NotAnObject(json_kind(&other))),
        Err(_) => Err(StoreError::NotAnObject("unserializable value")),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The document-store gateway.
///
/// Implementations are object-safe so application state can hold an
/// `Arc<dyn DocumentStore>` and swap the hosted backend for the in-memory
/// store in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document with a store-assigned ID.
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    /// Fetch a document by ID.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document at a known ID.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Replace the fields of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// List every document in a collection. Order is unspecified.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Equality-filtered query over a collection.
    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Widget {
        #[serde(default)]
        id: Option<String>,
        name: String,
    }

    #[test]
    fn test_decode_injects_document_id() {
        let doc = Document {
            id: "w-1".to_owned(),
            fields: json!({"name": "gear"})
                .as_object()
                .expect("object literal")
                .clone(),
        };
        let widget: Widget = doc.decode().expect("decode");
        assert_eq!(widget.id.as_deref(), Some("w-1"));
        assert_eq!(widget.name, "gear");
    }

    #[test]
    fn test_decode_error_names_document() {
        let doc = Document {
            id: "w-2".to_owned(),
            fields: json!({"name": 7}).as_object().expect("object literal").clone(),
        };
        let err = doc.decode::<Widget>().expect_err("should fail");
        assert!(err.to_string().contains("w-2"));
    }

    #[test]
    fn test_to_fields_strips_id() {
        let widget = Widget {
            id: Some("w-3".to_owned()),
            name: "cog".to_owned(),
        };
        let fields = to_fields(&widget).expect("object model");
        assert!(fields.get("id").is_none());
        assert_eq!(fields.get("name"), Some(&json!("cog")));
    }

    #[test]
    fn test_to_fields_rejects_non_object() {
        let err = to_fields(&42).expect_err("non-object");
        assert!(matches!(err, StoreError::NotAnObject("number")));
    }

    #[test]
    fn test_filter_matches() {
        let fields = json!({"userId": "u-1", "n": 2})
            .as_object()
            .expect("object literal")
            .clone();
        assert!(Filter::eq("userId", "u-1").matches(&fields));
        assert!(Filter::eq("n", 2).matches(&fields));
        assert!(!Filter::eq("userId", "u-2").matches(&fields));
        assert!(!Filter::eq("missing", "x").matches(&fields));
    }
}
