//! Kola Market Storefront - shop-facing JSON API.
//!
//! Serves sign-up/sign-in, saved shipping addresses, the cart, checkout,
//! and a customer's order history. State lives in a hosted document
//! database behind the [`kola_docstore::DocumentStore`] trait; the only
//! thing kept server-side in process memory is the session store.
//!
//! This crate is a library so the integration tests can build the full
//! router against an in-memory document store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use secrecy::SecretString;

/// Build the storefront application with its session layer attached.
///
/// `base_url` controls session-cookie security and `session_secret`
/// signs the cookie, the same way they do in production config.
#[must_use]
pub fn app(state: state::AppState, base_url: &str, session_secret: &SecretString) -> Router {
    routes::router(state).layer(middleware::session::create_session_layer(
        base_url,
        session_secret,
    ))
}
