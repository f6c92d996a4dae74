use std::sync::Arc;

use axum::{Json, extract::State};
use barbershop_core::{
    errors::BookingError,
    models::settings::{PublicSettings, Setting, UpdateSettingsRequest, merge_with_defaults},
};
use barbershop_db::repositories::settings;

use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

/// Business details for the public site: defaults overlaid with stored values
pub async fn get_public_settings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<PublicSettings>, AppError> {
    let rows = settings::list_settings(&state.db_pool).await?;

    let merged = merge_with_defaults(rows.iter().map(|row| (row.key.as_str(), row.value.as_str())));

    Ok(Json(merged))
}

pub async fn list_settings(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<Setting>>, AppError> {
    let rows = settings::list_settings(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(Setting::from).collect()))
}

/// Writes the values that differ from what is stored
#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<Vec<Setting>>, AppError> {
    let stored = settings::list_settings(&state.db_pool).await?;

    let mut changed = Vec::new();
    for (key, value) in payload.values {
        match stored.iter().find(|row| row.key == key) {
            Some(row) if row.value == value => {}
            Some(_) => changed.push((key, value)),
            None => {
                return Err(BookingError::NotFound(format!("Unknown setting: {}", key)).into());
            }
        }
    }

    if !changed.is_empty() {
        let unknown = settings::update_settings(&state.db_pool, &changed).await?;
        if let Some(key) = unknown.first() {
            return Err(BookingError::NotFound(format!("Unknown setting: {}", key)).into());
        }
        tracing::info!("Updated {} business settings", changed.len());
    }

    let rows = settings::list_settings(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(Setting::from).collect()))
}
