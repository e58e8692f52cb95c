//! Sales listing route handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::reporting::{format_amount, sort_by_date_desc, total_revenue};
use crate::routes::views::OrderRow;
use crate::state::AppState;

/// Sales table response: every order newest-first plus the all-time
/// revenue total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub rows: Vec<SalesRow>,
    pub total_revenue: String,
}

/// One row of the sales table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRow {
    /// 1-based position in the table.
    pub index: usize,
    #[serde(flatten)]
    pub order: OrderRow,
}

/// GET /sales - the full sales table.
pub async fn sales(State(state): State<AppState>) -> Result<Json<SalesResponse>> {
    let orders = state.order_snapshot().await?;

    let mut sorted = orders.as_ref().clone();
    sort_by_date_desc(&mut sorted);

    let rows = sorted
        .iter()
        .enumerate()
        .map(|(i, order)| SalesRow {
            index: i + 1,
            order: OrderRow::from_order(order),
        })
        .collect();

    Ok(Json(SalesResponse {
        rows,
        total_revenue: format_amount(total_revenue(&orders)),
    }))
}
