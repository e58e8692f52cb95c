//! Application state shared across handlers.

use std::sync::Arc;

use kola_docstore::{DocumentStore, RestConfig, RestStore};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the document-store gateway behind a
/// trait object so tests can swap in the in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Build state against the hosted document API from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let store = RestStore::new(RestConfig {
            base_url: config.docstore.url.clone(),
            api_token: config.docstore.api_token.clone(),
        });
        Self::with_store(Arc::new(store))
    }

    /// Build state over any document store.
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// The document-store gateway.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }
}
