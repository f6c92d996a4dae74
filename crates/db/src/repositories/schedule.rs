use crate::models::DbBarberSchedule;
use barbershop_core::models::schedule::ScheduleDayRequest;
use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

pub async fn get_schedules_by_barber_id(
    pool: &Pool<Postgres>,
    barber_id: Uuid,
) -> Result<Vec<DbBarberSchedule>> {
    let schedules = sqlx::query_as::<_, DbBarberSchedule>(
        r#"
        SELECT id, barber_id, day_of_week, start_time, end_time, is_active, break_start, break_end
        FROM barber_schedules
        WHERE barber_id = $1
        ORDER BY day_of_week ASC
        "#,
    )
    .bind(barber_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn get_day_schedule(
    pool: &Pool<Postgres>,
    barber_id: Uuid,
    day_of_week: u8,
) -> Result<Option<DbBarberSchedule>> {
    let schedule = sqlx::query_as::<_, DbBarberSchedule>(
        r#"
        SELECT id, barber_id, day_of_week, start_time, end_time, is_active, break_start, break_end
        FROM barber_schedules
        WHERE barber_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(barber_id)
    .bind(i16::from(day_of_week))
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

/// Inserts or replaces the row for `(barber_id, day.day_of_week)`.
pub async fn upsert_day<'e, E>(
    executor: E,
    barber_id: Uuid,
    day: &ScheduleDayRequest,
) -> Result<DbBarberSchedule>
where
    E: Executor<'e, Database = Postgres>,
{
    let schedule = sqlx::query_as::<_, DbBarberSchedule>(
        r#"
        INSERT INTO barber_schedules
            (id, barber_id, day_of_week, start_time, end_time, is_active, break_start, break_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (barber_id, day_of_week) DO UPDATE
        SET start_time = EXCLUDED.start_time,
            end_time = EXCLUDED.end_time,
            is_active = EXCLUDED.is_active,
            break_start = EXCLUDED.break_start,
            break_end = EXCLUDED.break_end
        RETURNING id, barber_id, day_of_week, start_time, end_time, is_active, break_start, break_end
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(barber_id)
    .bind(i16::from(day.day_of_week))
    .bind(day.start_time)
    .bind(day.end_time)
    .bind(day.is_active)
    .bind(day.break_start)
    .bind(day.break_end)
    .fetch_one(executor)
    .await?;

    Ok(schedule)
}

/// Writes all given days in one transaction and returns the full week.
pub async fn upsert_week(
    pool: &Pool<Postgres>,
    barber_id: Uuid,
    days: &[ScheduleDayRequest],
) -> Result<Vec<DbBarberSchedule>> {
    let mut tx = pool.begin().await?;

    for day in days {
        upsert_day(&mut *tx, barber_id, day).await?;
    }

    tx.commit().await?;

    tracing::debug!("Updated {} schedule days for barber {}", days.len(), barber_id);
    get_schedules_by_barber_id(pool, barber_id).await
}
