//! Cart routes.
//!
//! The cart is replaced wholesale on every save; the client owns the
//! merge logic (quantity bumps, removals) and sends the full item list.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use kola_core::CartItem;

use crate::db::carts::CartRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Cart-save request body.
#[derive(Debug, Deserialize)]
pub struct SaveCartRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// GET /cart - the signed-in user's cart items.
pub async fn items(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartItem>>> {
    let repo = CartRepository::new(state.store());
    let items = repo.items_for_user(&user.id).await?;
    Ok(Json(items))
}

/// PUT /cart - replace the cart with the given items.
pub async fn save(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<SaveCartRequest>,
) -> Result<Json<Vec<CartItem>>> {
    let repo = CartRepository::new(state.store());
    let cart = repo.save_items(&user.id, body.items).await?;
    Ok(Json(cart.items))
}

/// DELETE /cart - empty the cart.
pub async fn clear(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let repo = CartRepository::new(state.store());
    repo.clear(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
