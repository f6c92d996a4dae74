use crate::models::{DbAppointment, DbAppointmentWithService, DbBookedSpan};
use barbershop_core::models::appointment::{AppointmentFilter, AppointmentStatus, NewAppointment};
use barbershop_core::slots::BLOCK_MINUTES;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, client_name, client_phone, barber_id, service_id, \
    appointment_date, appointment_time, status, user_id, created_at";

/// Inserts a pending appointment.
///
/// A concurrent booking of the same slot fails on the unique slot index;
/// callers detect it with [`crate::is_unique_violation`].
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating appointment: id={}, barber={}, date={}, time={}",
        id,
        appointment.barber_id,
        appointment.appointment_date,
        appointment.appointment_time
    );

    let query = format!(
        r#"
        INSERT INTO appointments
            (id, client_name, client_phone, barber_id, service_id,
             appointment_date, appointment_time, status, user_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(id)
        .bind(appointment.client_name.trim())
        .bind(appointment.client_phone.trim())
        .bind(appointment.barber_id)
        .bind(appointment.service_id)
        .bind(appointment.appointment_date)
        .bind(appointment.appointment_time)
        .bind(AppointmentStatus::Pending.as_str())
        .bind(appointment.user_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    Ok(created)
}

/// Start times and durations of every live appointment for a barber's day.
///
/// Appointments whose service was deleted keep occupying one block.
pub async fn get_booked_spans(
    pool: &Pool<Postgres>,
    barber_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBookedSpan>> {
    let spans = sqlx::query_as::<_, DbBookedSpan>(
        r#"
        SELECT a.appointment_time, COALESCE(s.duration_minutes, $3) AS duration_minutes
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        WHERE a.barber_id = $1
          AND a.appointment_date = $2
          AND a.status <> 'cancelled'
        ORDER BY a.appointment_time ASC
        "#,
    )
    .bind(barber_id)
    .bind(date)
    .bind(BLOCK_MINUTES as i32)
    .fetch_all(pool)
    .await?;

    Ok(spans)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointmentWithService>> {
    let appointments = sqlx::query_as::<_, DbAppointmentWithService>(
        r#"
        SELECT a.id, a.client_name, a.client_phone, a.barber_id, a.service_id,
               a.appointment_date, a.appointment_time, a.status, a.user_id, a.created_at,
               s.name AS service_name,
               s.description AS service_description,
               s.duration_minutes AS service_duration_minutes,
               s.price_cents AS service_price_cents,
               s.is_active AS service_is_active
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        WHERE ($1::date IS NULL OR a.appointment_date = $1)
          AND ($2::text IS NULL OR a.status = $2)
        ORDER BY a.appointment_date ASC, a.appointment_time ASC
        "#,
    )
    .bind(filter.date)
    .bind(filter.status.map(|status| status.as_str()))
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let query = format!(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    );

    let updated = sqlx::query_as::<_, DbAppointment>(&query)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(updated)
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
