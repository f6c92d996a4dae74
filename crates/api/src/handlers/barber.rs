use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use barbershop_core::{
    errors::BookingError,
    models::{
        barber::{
            Barber, CreateBarberRequest, PhotoUploadResponse, SetBarberActiveRequest,
            UpdateBarberRequest,
        },
        schedule::default_week,
    },
    validation::validate_required,
};
use barbershop_db::repositories::{barber, schedule};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

const PHOTO_FIELD: &str = "photo";

fn not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Barber with ID {} not found", id))
}

/// Active barbers, ordered by name
pub async fn list_barbers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Barber>>, AppError> {
    let barbers = barber::list_barbers(&state.db_pool, true).await?;
    Ok(Json(barbers.into_iter().map(Barber::from).collect()))
}

pub async fn get_barber(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Barber>, AppError> {
    let barber = state
        .store
        .find_active_barber(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(barber))
}

pub async fn list_all_barbers(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<Barber>>, AppError> {
    let barbers = barber::list_barbers(&state.db_pool, false).await?;
    Ok(Json(barbers.into_iter().map(Barber::from).collect()))
}

/// Creates a barber together with the default weekly schedule
#[axum::debug_handler]
pub async fn create_barber(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateBarberRequest>,
) -> Result<(StatusCode, Json<Barber>), AppError> {
    validate_required("Name", &payload.name)?;

    let created = barber::create_barber(
        &state.db_pool,
        payload.name.trim(),
        payload.photo_url.as_deref(),
        payload.bio.as_deref(),
    )
    .await?;

    schedule::upsert_week(&state.db_pool, created.id, &default_week()).await?;

    tracing::info!("Created barber {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn update_barber(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBarberRequest>,
) -> Result<Json<Barber>, AppError> {
    if let Some(name) = &payload.name {
        validate_required("Name", name)?;
    }

    let updated = barber::update_barber(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn set_barber_active(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetBarberActiveRequest>,
) -> Result<Json<Barber>, AppError> {
    let changes = UpdateBarberRequest {
        is_active: Some(payload.is_active),
        ..UpdateBarberRequest::default()
    };

    let updated = barber::update_barber(&state.db_pool, id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!("Barber {} active={}", id, updated.is_active);
    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_barber(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !barber::delete_barber(&state.db_pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!("Deleted barber {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Stores the `photo` field of a multipart upload and points the barber at it
#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, AppError> {
    barber::get_barber_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BookingError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| BookingError::Validation(format!("Invalid photo upload: {}", e)))?;

        let url = state.photos.save(&file_name, &bytes).await?;

        let changes = UpdateBarberRequest {
            photo_url: Some(url.clone()),
            ..UpdateBarberRequest::default()
        };
        barber::update_barber(&state.db_pool, id, &changes).await?;

        return Ok(Json(PhotoUploadResponse { url }));
    }

    Err(BookingError::Validation(format!("Missing \"{}\" file field", PHOTO_FIELD)).into())
}
