//! Checkout route.
//!
//! Turns the signed-in user's cart into a completed order: prices the
//! cart, snapshots the latest shipping address, writes the order, then
//! clears the cart.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;

use kola_core::{CartItem, Order, OrderItem, OrderStatus, ShippingAddress};

use crate::db::addresses::AddressRepository;
use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Characters used in generated order references.
const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random part of a generated reference.
const REFERENCE_LEN: usize = 10;

/// Checkout request body. The payment provider's reference, when the
/// client has one; otherwise a reference is generated server-side.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub reference: Option<String>,
}

/// POST /checkout - create an order from the current cart.
///
/// The body is optional; an absent or empty body means "generate the
/// reference for me".
pub async fn checkout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    raw_body: Bytes,
) -> Result<(StatusCode, Json<Order>)> {
    let body: CheckoutRequest = if raw_body.is_empty() {
        CheckoutRequest::default()
    } else {
        serde_json::from_slice(&raw_body)
            .map_err(|e| AppError::BadRequest(format!("invalid checkout body: {e}")))?
    };

    let carts = CartRepository::new(state.store());
    let items = carts.items_for_user(&user.id).await?;
    if items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    add_breadcrumb("checkout", "placing order");

    let shipping_address = AddressRepository::new(state.store())
        .last_for_user(&user.id)
        .await?
        .map(|a| ShippingAddress {
            first_name: a.first_name,
            last_name: a.last_name,
            phone: Some(a.phone),
            address: Some(a.address),
            additional_info: Some(a.additional_info),
        });

    let total_price: Decimal = items.iter().map(CartItem::line_total).sum();
    let reference = body
        .reference
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(generate_reference);

    let order = Order {
        id: None,
        user_id: user.id.clone(),
        items: items.into_iter().map(order_item).collect(),
        total_price: Some(total_price),
        reference,
        status: OrderStatus::Completed,
        created_at: Some(Utc::now()),
        shipping_address,
    };

    let order = OrderRepository::new(state.store()).create(order).await?;
    carts.clear(&user.id).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

fn order_item(item: CartItem) -> OrderItem {
    OrderItem {
        product_id: item.product_id,
        title: item.title,
        quantity: item.quantity,
        price: item.price,
    }
}

/// Generate an order reference like `KM-7F2K9QX4BC`.
fn generate_reference() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..REFERENCE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..REFERENCE_CHARSET.len());
            REFERENCE_CHARSET[idx] as char
        })
        .collect();
    format!("KM-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_reference_shape() {
        let reference = generate_reference();
        assert!(reference.starts_with("KM-"));
        let suffix = &reference["KM-".len()..];
        assert_eq!(suffix.len(), REFERENCE_LEN);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        );
    }
}
