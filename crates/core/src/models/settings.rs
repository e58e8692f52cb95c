//! Dashboard settings document model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Well-known document ID of the settings singleton in the `dashboard`
/// collection.
pub const SETTINGS_DOC_ID: &str = "settings";

/// Dashboard owner settings.
///
/// Stored as a single document; readers fall back to [`Default`] when the
/// document is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    #[serde(default = "default_owner_email")]
    pub owner_email: String,
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub balance: Option<Decimal>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            owner_email: default_owner_email(),
            balance: Some(Decimal::ZERO),
        }
    }
}

fn default_owner_name() -> String {
    "Admin".to_owned()
}

fn default_owner_email() -> String {
    "admin@example.com".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: DashboardSettings = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(settings.owner_name, "Admin");
        assert_eq!(settings.owner_email, "admin@example.com");
        assert_eq!(settings.balance, None);
    }
}
