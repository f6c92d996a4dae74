use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use barbershop_core::{
    errors::BookingError,
    models::appointment::{
        Appointment, AppointmentFilter, AppointmentWithService, CreateAppointmentRequest,
        NewAppointment, UpdateAppointmentStatusRequest,
    },
    validation::{validate_booking_date, validate_client_name, validate_client_phone},
};
use barbershop_db::repositories::appointment;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::availability::available_slots,
    middleware::{
        auth::{AdminUser, MaybeUser},
        error_handling::AppError,
    },
};

/// Books an appointment for a client
///
/// The requested time must be one of the slots the calculator offers right
/// now. Two clients racing for the same slot are separated by the storage
/// uniqueness constraint; the loser gets a retryable 409.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    MaybeUser(user): MaybeUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    validate_client_name(&payload.client_name)?;
    validate_client_phone(&payload.client_phone)?;
    validate_booking_date(payload.date, state.today(), state.config.booking_window_days)?;

    let store = state.store.as_ref();

    store
        .find_active_barber(payload.barber_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Barber with ID {} not found", payload.barber_id))
        })?;

    let service = store
        .find_active_service(payload.service_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Service with ID {} not found", payload.service_id))
        })?;

    let free = available_slots(
        store,
        payload.barber_id,
        payload.date,
        service.duration_minutes,
    )
    .await?;
    if !free.contains(&payload.time) {
        tracing::warn!(
            "Rejected booking for barber {} on {} at {}: slot not available",
            payload.barber_id,
            payload.date,
            payload.time
        );
        return Err(BookingError::SlotTaken(format!(
            "{} at {}",
            payload.date,
            payload.time.format("%H:%M")
        ))
        .into());
    }

    let new_appointment = NewAppointment {
        client_name: payload.client_name.trim().to_string(),
        client_phone: payload.client_phone.trim().to_string(),
        barber_id: payload.barber_id,
        service_id: service.id,
        appointment_date: payload.date,
        appointment_time: payload.time,
        user_id: user.map(|user| user.id),
    };

    let created = store.create_appointment(&new_appointment).await?;
    tracing::info!(
        "Booked appointment {} with barber {} on {} at {}",
        created.id,
        created.barber_id,
        created.appointment_date,
        created.appointment_time
    );

    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<AppointmentWithService>>, AppError> {
    let rows = appointment::list_appointments(&state.db_pool, &filter).await?;

    let appointments = rows
        .into_iter()
        .map(AppointmentWithService::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let row = appointment::update_appointment_status(&state.db_pool, id, payload.status)
        .await
        .map_err(|err| {
            // Reviving a cancelled appointment can collide with a newer booking.
            if barbershop_db::is_unique_violation(&err) {
                BookingError::Conflict("Another appointment already holds this slot".to_string())
            } else {
                BookingError::Database(err)
            }
        })?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    tracing::info!("Appointment {} is now {}", id, payload.status);
    Ok(Json(Appointment::try_from(row)?))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !appointment::delete_appointment(&state.db_pool, id).await? {
        return Err(BookingError::NotFound(format!("Appointment with ID {} not found", id)).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
