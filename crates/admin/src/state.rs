//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use kola_core::Order;
use kola_docstore::{DocumentStore, RestConfig, RestStore};

use crate::config::AdminConfig;
use crate::db::orders::OrderSnapshotRepository;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// Holds the document-store gateway and a short-TTL cache of the
/// wholesale order snapshot so a burst of dashboard requests costs one
/// backend listing, not one per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DocumentStore>,
    orders: Cache<(), Arc<Vec<Order>>>,
    cache_ttl: Duration,
}

impl AppState {
    /// Build state against the hosted document API from configuration.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        let store = RestStore::new(RestConfig {
            base_url: config.docstore.url.clone(),
            api_token: config.docstore.api_token.clone(),
        });
        Self::with_store(Arc::new(store), config.report_cache_ttl)
    }

    /// Build state over any document store.
    ///
    /// A zero `cache_ttl` disables the snapshot cache entirely; every
    /// report then hits the backend (tests rely on this).
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>, cache_ttl: Duration) -> Self {
        let orders = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl.max(Duration::from_millis(1)))
            .build();
        Self {
            inner: Arc::new(AppStateInner {
                store,
                orders,
                cache_ttl,
            }),
        }
    }

    /// The document-store gateway.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// The order snapshot every report runs over, cached for the
    /// configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ReportUnavailable` when the backend listing
    /// fails and no fresh snapshot is cached.
    pub async fn order_snapshot(&self) -> Result<Arc<Vec<Order>>, AppError> {
        let repo = OrderSnapshotRepository::new(self.store());

        if self.inner.cache_ttl.is_zero() {
            return repo
                .all()
                .await
                .map(Arc::new)
                .map_err(|err| AppError::ReportUnavailable(err.to_string()));
        }

        self.inner
            .orders
            .try_get_with((), async { repo.all().await.map(Arc::new) })
            .await
            .map_err(|err| AppError::ReportUnavailable(err.to_string()))
    }
}
