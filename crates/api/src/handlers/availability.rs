//! # Availability Handlers
//!
//! Answers "which start times can still be booked with this barber on this
//! date?". Inputs are read through the [`BookingStore`] port and the answer
//! comes from [`compute_available_slots_for_day`]:
//!
//! 1. Resolve the requested duration (from the service, or `duration`, or one block)
//! 2. Load the barber's schedule for the weekday of `date`
//! 3. Load the day's non-cancelled bookings with their service durations
//! 4. Run the calculator
//!
//! Dates outside the booking window never offer slots.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use barbershop_core::{
    errors::{BookingError, BookingResult},
    models::availability::AvailabilityResponse,
    ports::BookingStore,
    slots::{BLOCK_MINUTES, compute_available_slots_for_day},
    validation::within_booking_window,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
///
/// `service_id` takes precedence over `duration`; with neither, a single
/// block is requested.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub service_id: Option<Uuid>,
    pub duration: Option<u32>,
}

/// Free start times for a barber on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/barbers/:id/availability?date=2026-03-16&service_id=<uuid>
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown or inactive barber or service
/// * `BookingError::Database` - Storage failure
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(barber_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let store = state.store.as_ref();

    store
        .find_active_barber(barber_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Barber with ID {} not found", barber_id)))?;

    let duration_minutes = match query.service_id {
        Some(service_id) => {
            store
                .find_active_service(service_id)
                .await?
                .ok_or_else(|| {
                    BookingError::NotFound(format!("Service with ID {} not found", service_id))
                })?
                .duration_minutes
        }
        None => query.duration.unwrap_or(BLOCK_MINUTES),
    };

    let window_days = state.config.booking_window_days;
    let slots = if within_booking_window(query.date, state.today(), window_days) {
        available_slots(store, barber_id, query.date, duration_minutes).await?
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Barber {} has {} free slots on {} for {} minutes",
        barber_id,
        slots.len(),
        query.date,
        duration_minutes
    );

    Ok(Json(AvailabilityResponse {
        barber_id,
        date: query.date,
        duration_minutes,
        slots,
    }))
}

/// Loads the weekday schedule and bookings for `date` and computes the free
/// start times. Shared with the booking handler so both agree on what is free.
pub async fn available_slots(
    store: &dyn BookingStore,
    barber_id: Uuid,
    date: NaiveDate,
    duration_minutes: u32,
) -> BookingResult<Vec<NaiveTime>> {
    let day_of_week = date.weekday().num_days_from_sunday() as u8;

    let schedule = store.day_schedule(barber_id, day_of_week).await?;
    let bookings = store.booked_spans(barber_id, date).await?;

    Ok(compute_available_slots_for_day(
        schedule.as_ref(),
        &bookings,
        duration_minutes,
    ))
}
