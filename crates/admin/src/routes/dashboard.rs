//! Dashboard route handlers.

use axum::{Json, extract::Query, extract::State};
use chrono::{Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::reporting::{
    self, ChartSeries, format_amount, quantity_sold_in_year, revenue_in_month, rotate_to_end,
    sales_by_weekday, total_revenue,
};
use crate::routes::views::OrderRow;
use crate::state::AppState;

/// How many orders the dashboard shows under "recent".
const RECENT_ORDER_COUNT: usize = 2;

/// Dashboard summary response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_revenue: String,
    pub revenue_this_month: String,
    pub quantity_sold_this_year: u64,
    pub recent_orders: Vec<OrderRow>,
    pub chart: ChartSeries,
}

/// Query parameters for the standalone chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Weekday anchor, e.g. `Wed` or `wednesday`.
    pub today: Option<String>,
}

/// GET /dashboard - the full dashboard payload.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let orders = state.order_snapshot().await?;
    let now = Utc::now();

    let mut sorted = orders.as_ref().clone();
    reporting::sort_by_date_desc(&mut sorted);
    let recent_orders = sorted
        .iter()
        .take(RECENT_ORDER_COUNT)
        .map(OrderRow::from_order)
        .collect();

    let chart = rotate_to_end(&sales_by_weekday(&orders), now.weekday());

    Ok(Json(DashboardResponse {
        total_revenue: format_amount(total_revenue(&orders)),
        revenue_this_month: format_amount(revenue_in_month(&orders, now)),
        quantity_sold_this_year: quantity_sold_in_year(&orders, now),
        recent_orders,
        chart,
    }))
}

/// GET /dashboard/chart?today=Wed - the rotated series for an explicit
/// anchor; defaults to the current weekday.
pub async fn chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartSeries>> {
    let today = match query.today {
        Some(raw) => parse_weekday(&raw)?,
        None => Utc::now().weekday(),
    };

    let orders = state.order_snapshot().await?;
    Ok(Json(rotate_to_end(&sales_by_weekday(&orders), today)))
}

/// Parse a weekday label, answering 400 for anything unrecognized.
fn parse_weekday(raw: &str) -> Result<Weekday> {
    raw.parse::<Weekday>()
        .map_err(|_| AppError::BadRequest(format!("unrecognized weekday: '{raw}'")))
}
