//! End-to-end storefront tests: sign-up through checkout.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use kola_integration_tests::TestShop;

const PASSWORD: &str = "Sunlit9!road";

async fn sign_up(shop: &mut TestShop, email: &str) {
    let response = shop
        .storefront(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstName": "Amina",
                "lastName": "Bello",
                "email": email,
                "password": PASSWORD,
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_full_shopping_journey() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "amina@kolamarket.test").await;

    // Signed in immediately after sign-up
    let me = shop.storefront("GET", "/auth/me", None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "amina@kolamarket.test");

    // Save a delivery address
    let created = shop
        .storefront(
            "POST",
            "/account/addresses",
            Some(json!({
                "firstName": "Amina",
                "lastName": "Bello",
                "phone": "08012345678",
                "address": "12 Marina Road, Lagos",
                "additionalInfo": "Blue gate",
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let last = shop.storefront("GET", "/account/addresses/last", None).await;
    assert_eq!(last.status, StatusCode::OK);
    assert_eq!(last.body["address"], "12 Marina Road, Lagos");

    // Fill the cart
    let saved = shop
        .storefront(
            "PUT",
            "/cart",
            Some(json!({
                "items": [
                    {"productId": "p-1", "title": "Jollof spice", "quantity": 2, "price": "1200.50"},
                    {"productId": "p-2", "title": "Palm oil 1L", "quantity": 1, "price": "3400"},
                ]
            })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.body.as_array().unwrap().len(), 2);

    // Check out
    let order = shop.storefront("POST", "/checkout", None).await;
    assert_eq!(order.status, StatusCode::CREATED, "{:?}", order.body);
    assert_eq!(order.body["totalPrice"], "5801.00");
    assert_eq!(order.body["status"], "completed");
    assert_eq!(order.body["shippingAddress"]["firstName"], "Amina");
    let reference = order.body["reference"].as_str().unwrap();
    assert!(reference.starts_with("KM-"), "reference was {reference}");

    // Cart is emptied by checkout
    let cart = shop.storefront("GET", "/cart", None).await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.as_array().unwrap().is_empty());

    // The order shows up in history
    let orders = shop.storefront("GET", "/account/orders", None).await;
    assert_eq!(orders.status, StatusCode::OK);
    let rows = orders.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["reference"], reference);

    // Sign out ends the session
    let out = shop.storefront("POST", "/auth/signout", None).await;
    assert_eq!(out.status, StatusCode::OK);
    let me = shop.storefront("GET", "/auth/me", None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_restores_access() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "tunde@kolamarket.test").await;
    shop.drop_session();

    let me = shop.storefront("GET", "/auth/me", None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let signin = shop
        .storefront(
            "POST",
            "/auth/signin",
            Some(json!({"email": "tunde@kolamarket.test", "password": PASSWORD})),
        )
        .await;
    assert_eq!(signin.status, StatusCode::OK);

    let me = shop.storefront("GET", "/auth/me", None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["firstName"], "Amina");
}

#[tokio::test]
async fn test_signin_rejects_wrong_password() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "kemi@kolamarket.test").await;
    shop.drop_session();

    let signin = shop
        .storefront(
            "POST",
            "/auth/signin",
            Some(json!({"email": "kemi@kolamarket.test", "password": "Wrong9!pass"})),
        )
        .await;
    assert_eq!(signin.status, StatusCode::UNAUTHORIZED);
    assert_eq!(signin.body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "dupe@kolamarket.test").await;
    shop.drop_session();

    let again = shop
        .storefront(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstName": "Other",
                "lastName": "Person",
                "email": "dupe@kolamarket.test",
                "password": PASSWORD,
            })),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_weak_password() {
    let mut shop = TestShop::new();
    let response = shop
        .storefront(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstName": "Amina",
                "lastName": "Bello",
                "email": "weak@kolamarket.test",
                "password": "alllowercase1!",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_requires_all_fields() {
    let mut shop = TestShop::new();
    let response = shop
        .storefront(
            "POST",
            "/auth/signup",
            Some(json!({"firstName": "", "lastName": "Bello", "email": "x@y.test", "password": PASSWORD})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "all fields are required");
}

#[tokio::test]
async fn test_address_validation_floors() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "floors@kolamarket.test").await;

    let short_phone = shop
        .storefront(
            "POST",
            "/account/addresses",
            Some(json!({
                "firstName": "Amina",
                "lastName": "Bello",
                "phone": "12345",
                "address": "12 Marina Road",
            })),
        )
        .await;
    assert_eq!(short_phone.status, StatusCode::BAD_REQUEST);

    let last = shop.storefront("GET", "/account/addresses/last", None).await;
    assert_eq!(last.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_requires_non_empty_cart() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "empty@kolamarket.test").await;

    let response = shop.storefront("POST", "/checkout", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad request: cart is empty");
}

#[tokio::test]
async fn test_checkout_keeps_client_reference() {
    let mut shop = TestShop::new();
    sign_up(&mut shop, "psp@kolamarket.test").await;

    shop.storefront(
        "PUT",
        "/cart",
        Some(json!({"items": [{"productId": "p-1", "quantity": 1, "price": 100}]})),
    )
    .await;

    let order = shop
        .storefront("POST", "/checkout", Some(json!({"reference": "PSP-42XY"})))
        .await;
    assert_eq!(order.status, StatusCode::CREATED);
    assert_eq!(order.body["reference"], "PSP-42XY");
}

#[tokio::test]
async fn test_cart_requires_auth() {
    let mut shop = TestShop::new();
    let response = shop.storefront("GET", "/cart", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
