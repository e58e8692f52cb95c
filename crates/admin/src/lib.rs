//! Kola Market Admin - internal sales dashboard.
//!
//! Serves summary revenue figures, a weekday revenue chart rotated so
//! today is the last bucket, recent-order and full sales listings, and
//! the dashboard settings document. Reads the same document database the
//! storefront writes.
//!
//! The reporting math lives in [`reporting`] as pure functions over an
//! order snapshot; handlers fetch the snapshot (moka-cached) and pass
//! the clock in explicitly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod reporting;
pub mod routes;
pub mod state;

use axum::Router;

/// Build the admin application.
#[must_use]
pub fn app(state: state::AppState) -> Router {
    routes::router(state)
}
