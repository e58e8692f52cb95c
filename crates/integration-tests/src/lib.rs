//! Integration test harness for Kola Market.
//!
//! Builds the storefront and admin routers in-process over one shared
//! in-memory document store, so a test can sign up and shop through the
//! storefront and then read the result off the admin dashboard without
//! any network or external database.
//!
//! Requests are driven through `tower::ServiceExt::oneshot`; the harness
//! carries the storefront session cookie between requests the way a
//! browser would.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kola_docstore::{DocumentStore, MemoryStore};

/// One JSON response: status plus decoded body.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// An in-process deployment: both services over one shared store.
pub struct TestShop {
    pub store: Arc<MemoryStore>,
    storefront: Router,
    admin: Router,
    session_cookie: Option<String>,
}

impl TestShop {
    /// Spin up both routers over a fresh in-memory store.
    ///
    /// The admin order cache is configured with a zero TTL so writes made
    /// through the storefront are visible to the next admin request.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let shared: Arc<dyn DocumentStore> = store.clone();

        let storefront_state = kola_storefront::state::AppState::with_store(shared.clone());
        let session_secret =
            secrecy::SecretString::from("kqJ8vT2mWx5nRb9pLc4dFh7gYs3zMa6e");
        let storefront =
            kola_storefront::app(storefront_state, "http://localhost:3000", &session_secret);

        let admin_state = kola_admin::state::AppState::with_store(shared, Duration::ZERO);
        let admin = kola_admin::app(admin_state);

        Self {
            store,
            storefront,
            admin,
            session_cookie: None,
        }
    }

    /// Send a request to the storefront, carrying the session cookie.
    ///
    /// # Panics
    ///
    /// Panics when the request cannot be built or served; integration
    /// tests treat that as a failure, not a condition to handle.
    pub async fn storefront(
        &mut self,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .storefront
            .clone()
            .oneshot(request)
            .await
            .expect("storefront serves");

        self.capture_session_cookie(&response);
        read_response(response).await
    }

    /// Send a request to the admin service.
    ///
    /// # Panics
    ///
    /// Panics when the request cannot be built or served.
    pub async fn admin(&self, method: &str, path: &str, body: Option<serde_json::Value>) -> ApiResponse {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .admin
            .clone()
            .oneshot(request)
            .await
            .expect("admin serves");

        read_response(response).await
    }

    /// Forget the session cookie, simulating a fresh browser.
    pub fn drop_session(&mut self) {
        self.session_cookie = None;
    }

    fn capture_session_cookie(&mut self, response: &Response<Body>) {
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            if let Ok(raw) = set_cookie.to_str() {
                // Keep only the name=value pair, not the attributes
                if let Some(pair) = raw.split(';').next() {
                    self.session_cookie = Some(pair.to_owned());
                }
            }
        }
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_response(response: Response<Body>) -> ApiResponse {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    ApiResponse { status, body }
}
