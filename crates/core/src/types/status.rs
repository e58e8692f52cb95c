//! Status enums for stored entities.

use serde::{Deserialize, Serialize};

/// Order status.
///
/// The checkout flow records orders with a payment reference already in
/// hand, so newly created orders are `Completed`. Unknown values written
/// by other clients decode as `Completed` rather than failing the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cancelled,
    #[default]
    #[serde(other)]
    Completed,
}
