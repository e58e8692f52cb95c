//! Account routes: shipping addresses and order history.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use kola_core::{Address, Order, UserId};

use crate::db::addresses::AddressRepository;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Minimum lengths for address fields, matching the delivery form.
const MIN_NAME_LEN: usize = 3;
const MIN_PHONE_LEN: usize = 10;
const MIN_ADDRESS_LEN: usize = 5;

/// New-address request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddressRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub additional_info: String,
}

impl NewAddressRequest {
    fn validate(&self) -> std::result::Result<(), String> {
        let required = [&self.first_name, &self.last_name, &self.phone, &self.address];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err("all fields are required".to_owned());
        }
        if self.first_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(format!("first name must be at least {MIN_NAME_LEN} characters"));
        }
        if self.last_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(format!("last name must be at least {MIN_NAME_LEN} characters"));
        }
        if self.phone.trim().chars().count() < MIN_PHONE_LEN {
            return Err(format!("phone must be at least {MIN_PHONE_LEN} characters"));
        }
        if self.address.trim().chars().count() < MIN_ADDRESS_LEN {
            return Err(format!("address must be at least {MIN_ADDRESS_LEN} characters"));
        }
        Ok(())
    }

    fn into_address(self, user_id: UserId) -> Address {
        Address {
            id: None,
            user_id,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            additional_info: self.additional_info.trim().to_owned(),
            created_at: None,
        }
    }
}

/// GET /account/addresses - all of the user's saved addresses.
pub async fn list_addresses(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Address>>> {
    let repo = AddressRepository::new(state.store());
    let addresses = repo.list_for_user(&user.id).await?;
    Ok(Json(addresses))
}

/// POST /account/addresses - save a new shipping address.
pub async fn create_address(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<NewAddressRequest>,
) -> Result<(StatusCode, Json<Address>)> {
    body.validate().map_err(AppError::BadRequest)?;

    let repo = AddressRepository::new(state.store());
    let address = repo
        .create(&user.id, body.into_address(user.id.clone()))
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /account/addresses/last - most recent address, 404 when none saved.
pub async fn last_address(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Address>> {
    let repo = AddressRepository::new(state.store());
    let address = repo
        .last_for_user(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no saved addresses".to_owned()))?;
    Ok(Json(address))
}

/// GET /account/orders - the user's order history, newest first.
pub async fn list_orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.store());
    let orders = repo.list_for_user(&user.id).await?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewAddressRequest {
        NewAddressRequest {
            first_name: "Amina".to_owned(),
            last_name: "Bello".to_owned(),
            phone: "08012345678".to_owned(),
            address: "12 Marina Road, Lagos".to_owned(),
            additional_info: String::new(),
        }
    }

    #[test]
    fn test_valid_address_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_field_is_required() {
        let mut req = request();
        req.phone = "   ".to_owned();
        assert_eq!(req.validate().unwrap_err(), "all fields are required");
    }

    #[test]
    fn test_short_fields_rejected() {
        let mut req = request();
        req.first_name = "Al".to_owned();
        assert!(req.validate().unwrap_err().contains("first name"));

        let mut req = request();
        req.phone = "080123".to_owned();
        assert!(req.validate().unwrap_err().contains("phone"));

        let mut req = request();
        req.address = "x".repeat(4);
        assert!(req.validate().unwrap_err().contains("address"));
    }

    #[test]
    fn test_additional_info_is_optional() {
        let req = request();
        assert!(req.additional_info.is_empty());
        assert!(req.validate().is_ok());
    }
}
