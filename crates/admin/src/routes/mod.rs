//! HTTP route handlers for the admin dashboard.
//!
//! ```text
//! GET /health           - Health check
//! GET /dashboard        - Summary figures, recent orders, weekday chart
//! GET /dashboard/chart  - Rotated weekday series for an explicit anchor
//! GET /sales            - Full sales table, newest first
//! GET /settings         - Dashboard settings (defaults when unset)
//! PUT /settings         - Merge-update dashboard settings
//! ```

pub mod dashboard;
pub mod sales;
pub mod settings;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

/// Shared view of one order as a table/list row.
pub(crate) mod views {
    use serde::Serialize;

    use kola_core::Order;

    use crate::reporting::format_amount;

    /// One order rendered for a listing.
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderRow {
        pub customer: String,
        pub total: String,
        pub date: String,
        pub reference: String,
    }

    impl OrderRow {
        pub fn from_order(order: &Order) -> Self {
            Self {
                customer: order
                    .customer_name()
                    .unwrap_or_else(|| "Unknown customer".to_owned()),
                total: format_amount(order.total_or_zero()),
                date: order
                    .created_at
                    .map_or_else(|| "unknown".to_owned(), |at| at.format("%Y-%m-%d").to_string()),
                reference: order.reference.clone(),
            }
        }
    }
}

/// Create the full admin router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/chart", get(dashboard::chart))
        .route("/sales", get(sales::sales))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
