//! Document models for the backend collections.
//!
//! These are the shapes stored in the hosted document database. Fields
//! written by earlier clients decode leniently (see [`crate::lenient`]);
//! fields this codebase writes are stamped consistently (RFC 3339
//! timestamps, decimal-string money).

pub mod address;
pub mod cart;
pub mod order;
pub mod settings;
pub mod user;

pub use address::Address;
pub use cart::{Cart, CartItem};
pub use order::{Order, OrderItem, ShippingAddress};
pub use settings::{DashboardSettings, SETTINGS_DOC_ID};
pub use user::UserRecord;

/// Collection names in the hosted document database.
pub mod collections {
    /// Registered user accounts.
    pub const USERS: &str = "users";
    /// One cart document per user.
    pub const CARTS: &str = "carts";
    /// Shipping addresses captured at checkout.
    pub const ADDRESSES: &str = "addresses";
    /// Completed purchase records.
    pub const ORDERS: &str = "orders";
    /// Dashboard settings singleton.
    pub const DASHBOARD: &str = "dashboard";
}
