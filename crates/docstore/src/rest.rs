//! REST client for the hosted document API.
//!
//! The backend exposes collections over plain HTTP:
//!
//! ```text
//! GET    /v1/collections/{name}/documents            - list / query
//! POST   /v1/collections/{name}/documents            - insert (ID assigned)
//! GET    /v1/collections/{name}/documents/{id}       - fetch
//! PUT    /v1/collections/{name}/documents/{id}       - create-or-replace
//! PATCH  /v1/collections/{name}/documents/{id}       - replace fields
//! DELETE /v1/collections/{name}/documents/{id}       - delete
//! ```
//!
//! Equality filters ride as repeated `field=value` query pairs on the list
//! endpoint; non-string values are JSON-encoded.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::{Document, DocumentStore, Filter, StoreError};

/// Connection settings for the hosted document API.
#[derive(Clone)]
pub struct RestConfig {
    /// Base URL of the document API, e.g. `https://db.example.com`.
    pub base_url: Url,
    /// Bearer token for the API.
    pub api_token: SecretString,
}

impl std::fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

/// Wire shape of a document in API responses.
#[derive(Debug, Deserialize)]
struct WireDocument {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl From<WireDocument> for Document {
    fn from(wire: WireDocument) -> Self {
        Self {
            id: wire.id,
            fields: wire.fields,
        }
    }
}

/// Client for the hosted document API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    config: RestConfig,
}

impl RestStore {
    /// Create a new client.
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        self.config
            .base_url
            .join(&format!("v1/collections/{collection}/documents"))
            .map_err(|e| StoreError::Api {
                status: 0,
                message: format!("invalid collection URL: {e}"),
            })
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        self.config
            .base_url
            .join(&format!("v1/collections/{collection}/documents/{id}"))
            .map_err(|e| StoreError::Api {
                status: 0,
                message: format!("invalid document URL: {e}"),
            })
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(self.config.api_token.expose_secret())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Encode a filter value for the query string: bare strings stay bare,
/// everything else is JSON text.
fn encode_filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let url = self.collection_url(collection)?;
        debug!(collection, "inserting document");
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&fields)
            .send()
            .await?;
        let wire: WireDocument = Self::check(response).await?.json().await?;
        Ok(wire.into())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self.request(reqwest::Method::GET, url).send().await?;
        match Self::check(response).await {
            Ok(response) => {
                let wire: WireDocument = response.json().await?;
                Ok(Some(wire.into()))
            }
            Err(StoreError::NotFound) => Ok(None),
            Err(other) => Err(other),
        }
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&fields)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(&fields)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        match Self::check(response).await {
            // Deleting a missing document is not an error.
            Ok(_) | Err(StoreError::NotFound) => Ok(()),
            Err(other) => Err(other),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.query(collection, &[]).await
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let mut url = self.collection_url(collection)?;
        {
            let mut pairs = url.query_pairs_mut();
            for filter in filters {
                pairs.append_pair(&filter.field, &encode_filter_value(&filter.value));
            }
        }
        debug!(collection, filters = filters.len(), "querying documents");
        let response = self.request(reqwest::Method::GET, url).send().await?;
        let wire: Vec<WireDocument> = Self::check(response).await?.json().await?;
        Ok(wire.into_iter().map(Into::into).collect())
    }
}
