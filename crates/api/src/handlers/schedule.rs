use std::{collections::HashSet, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
};
use barbershop_core::{
    errors::BookingError,
    models::schedule::{UpdateWeekRequest, WeekScheduleResponse, WeekdaySchedule, default_week},
    validation::validate_schedule_day,
};
use barbershop_db::{
    models::DbBarberSchedule,
    repositories::{barber, schedule},
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

async fn ensure_barber(state: &ApiState, id: Uuid) -> Result<(), AppError> {
    barber::get_barber_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Barber with ID {} not found", id)))?;
    Ok(())
}

fn week_response(barber_id: Uuid, rows: Vec<DbBarberSchedule>) -> WeekScheduleResponse {
    WeekScheduleResponse {
        barber_id,
        days: rows.into_iter().map(WeekdaySchedule::from).collect(),
    }
}

#[axum::debug_handler]
pub async fn get_week(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(barber_id): Path<Uuid>,
) -> Result<Json<WeekScheduleResponse>, AppError> {
    ensure_barber(&state, barber_id).await?;

    let rows = schedule::get_schedules_by_barber_id(&state.db_pool, barber_id).await?;
    Ok(Json(week_response(barber_id, rows)))
}

/// Replaces the given weekdays; days not mentioned keep their hours
#[axum::debug_handler]
pub async fn update_week(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(barber_id): Path<Uuid>,
    Json(payload): Json<UpdateWeekRequest>,
) -> Result<Json<WeekScheduleResponse>, AppError> {
    if payload.days.is_empty() {
        return Err(BookingError::Validation("At least one day is required".to_string()).into());
    }

    let mut seen = HashSet::new();
    for day in &payload.days {
        validate_schedule_day(day)?;
        if !seen.insert(day.day_of_week) {
            return Err(BookingError::Validation(format!(
                "Day {} appears more than once",
                day.day_of_week
            ))
            .into());
        }
    }

    ensure_barber(&state, barber_id).await?;

    let rows = schedule::upsert_week(&state.db_pool, barber_id, &payload.days).await?;
    tracing::info!("Updated {} schedule days for barber {}", payload.days.len(), barber_id);

    Ok(Json(week_response(barber_id, rows)))
}

#[axum::debug_handler]
pub async fn reset_week(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(barber_id): Path<Uuid>,
) -> Result<Json<WeekScheduleResponse>, AppError> {
    ensure_barber(&state, barber_id).await?;

    let rows = schedule::upsert_week(&state.db_pool, barber_id, &default_week()).await?;
    tracing::info!("Reset schedule of barber {} to defaults", barber_id);

    Ok(Json(week_response(barber_id, rows)))
}
