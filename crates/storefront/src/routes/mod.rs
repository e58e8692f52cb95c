//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Auth
//! POST /auth/signup             - Create an account
//! POST /auth/signin             - Sign in (sets session cookie)
//! POST /auth/signout            - Sign out
//! GET  /auth/me                 - Session user
//!
//! # Account (requires auth)
//! GET  /account/addresses       - Address list
//! POST /account/addresses       - Save a new address
//! GET  /account/addresses/last  - Most recent address (payment pre-fill)
//! GET  /account/orders          - Order history, newest first
//!
//! # Cart (requires auth)
//! GET    /cart                  - Cart items
//! PUT    /cart                  - Replace cart wholesale
//! DELETE /cart                  - Clear cart
//!
//! # Checkout (requires auth)
//! POST /checkout                - Create an order from the cart
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the full storefront router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .route(
            "/cart",
            put(cart::save).get(cart::items).delete(cart::clear),
        )
        .route("/checkout", post(checkout::checkout))
        .with_state(state)
}

/// Create the auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
        .route("/me", get(auth::me))
}

/// Create the account routes router.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/addresses",
            get(account::list_addresses).post(account::create_address),
        )
        .route("/addresses/last", get(account::last_address))
        .route("/orders", get(account::list_orders))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
