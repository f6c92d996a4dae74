use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use barbershop_core::{
    errors::BookingError,
    models::service::{Service, ServiceRequest},
    validation::validate_service,
};
use barbershop_db::repositories::service;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

fn not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Service with ID {} not found", id))
}

pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = service::list_services(&state.db_pool, true).await?;
    Ok(Json(services.into_iter().map(Service::from).collect()))
}

pub async fn list_all_services(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = service::list_services(&state.db_pool, false).await?;
    Ok(Json(services.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    validate_service(&payload)?;

    let created = service::create_service(&state.db_pool, &payload).await?;
    tracing::info!("Created service {} ({})", created.name, created.id);

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    validate_service(&payload)?;

    let updated = service::update_service(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(updated.into()))
}

/// Past appointments keep their row; their service reference is cleared
#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !service::delete_service(&state.db_pool, id).await? {
        return Err(not_found(id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
