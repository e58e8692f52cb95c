//! Order document model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::types::{OrderId, OrderStatus, ProductId, UserId};

/// A completed purchase record.
///
/// Orders are immutable once created: the checkout flow writes them and
/// the dashboard only reads snapshots. Money and timestamp fields decode
/// leniently because older client code wrote them inconsistently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned document ID; absent until the order is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// User who placed the order.
    pub user_id: UserId,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Order total. `None` when the stored value is missing or unusable;
    /// aggregation treats that as zero.
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub total_price: Option<Decimal>,
    /// Payment reference from the payment collaborator.
    #[serde(default)]
    pub reference: String,
    /// Order status.
    #[serde(default)]
    pub status: OrderStatus,
    /// When the order was placed. `None` when missing or unparseable;
    /// such orders are skipped by date-based reporting.
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Snapshot of the shipping address at checkout time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
}

impl Order {
    /// The order total with a missing or unusable value coerced to zero.
    #[must_use]
    pub fn total_or_zero(&self) -> Decimal {
        self.total_price.unwrap_or_default()
    }

    /// Sum of line-item quantities, treating missing quantities as zero.
    #[must_use]
    pub fn quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.quantity.unwrap_or(0))
            .sum()
    }

    /// The order date, with missing or unparseable dates pinned to the
    /// epoch so they sort as the oldest.
    #[must_use]
    pub fn created_at_or_epoch(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Customer name from the shipping-address snapshot, if present.
    #[must_use]
    pub fn customer_name(&self) -> Option<String> {
        self.shipping_address
            .as_ref()
            .map(|addr| format!("{} {}", addr.first_name, addr.last_name))
    }
}

/// A line item within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product reference.
    pub product_id: ProductId,
    /// Display title captured at purchase time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Units purchased.
    #[serde(default, deserialize_with = "lenient::opt_quantity")]
    pub quantity: Option<u64>,
    /// Unit price at purchase time.
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub price: Option<Decimal>,
}

impl OrderItem {
    /// Line total (price × quantity), with gaps coerced to zero.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.unwrap_or_default() * Decimal::from(self.quantity.unwrap_or(0))
    }
}

/// Shipping address snapshot stored on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}
