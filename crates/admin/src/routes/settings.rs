//! Dashboard settings route handlers.

use axum::{Json, extract::State};

use kola_core::DashboardSettings;

use crate::db::settings::{SettingsPatch, SettingsRepository};
use crate::error::Result;
use crate::state::AppState;

/// GET /settings - current settings, defaults when unset.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<DashboardSettings>> {
    let repo = SettingsRepository::new(state.store());
    Ok(Json(repo.get().await?))
}

/// PUT /settings - merge the given fields into the stored settings.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<DashboardSettings>> {
    let repo = SettingsRepository::new(state.store());
    Ok(Json(repo.update(patch).await?))
}
