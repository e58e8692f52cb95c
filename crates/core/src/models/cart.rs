//! Cart document model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::types::{CartId, ProductId, UserId};

/// A user's cart as stored in the `carts` collection.
///
/// At most one cart document exists per user; saves replace the item list
/// wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Store-assigned document ID; absent until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A line item in a cart.
///
/// Same lenient money/quantity handling as order items; the checkout flow
/// turns these into [`crate::models::OrderItem`]s verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_quantity")]
    pub quantity: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub price: Option<Decimal>,
}

impl CartItem {
    /// Line total (price × quantity), with gaps coerced to zero.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.unwrap_or_default() * Decimal::from(self.quantity.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_default() {
        let cart: Cart = serde_json::from_str(r#"{"userId": "u-1"}"#).expect("deserialize");
        assert!(cart.items.is_empty());
        assert!(cart.updated_at.is_none());
    }

    #[test]
    fn test_line_total_with_gaps() {
        let item: CartItem =
            serde_json::from_str(r#"{"productId": "p-1", "price": "10.00"}"#).expect("deserialize");
        assert_eq!(item.line_total(), Decimal::ZERO);
    }
}
