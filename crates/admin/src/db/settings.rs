//! Dashboard settings singleton.

use rust_decimal::Decimal;
use serde::Deserialize;

use kola_core::{DashboardSettings, SETTINGS_DOC_ID, collections};
use kola_docstore::{DocumentStore, StoreError, to_fields};

/// A partial settings update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub balance: Option<Decimal>,
}

/// Repository for the settings document in the `dashboard` collection.
pub struct SettingsRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Current settings, falling back to defaults when the document is
    /// absent or unreadable fields are missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the read fails.
    pub async fn get(&self) -> Result<DashboardSettings, StoreError> {
        let doc = self.store.get(collections::DASHBOARD, SETTINGS_DOC_ID).await?;
        match doc {
            Some(doc) => Ok(doc.decode()?),
            None => Ok(DashboardSettings::default()),
        }
    }

    /// Merge a patch into the stored settings and write the result back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the read or write fails.
    pub async fn update(&self, patch: SettingsPatch) -> Result<DashboardSettings, StoreError> {
        let mut settings = self.get().await?;

        if let Some(name) = patch.owner_name {
            settings.owner_name = name;
        }
        if let Some(email) = patch.owner_email {
            settings.owner_email = email;
        }
        if let Some(balance) = patch.balance {
            settings.balance = Some(balance);
        }

        self.store
            .set(collections::DASHBOARD, SETTINGS_DOC_ID, to_fields(&settings)?)
            .await?;

        Ok(settings)
    }
}
