use crate::models::DbBarber;
use barbershop_core::models::barber::UpdateBarberRequest;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_barber(
    pool: &Pool<Postgres>,
    name: &str,
    photo_url: Option<&str>,
    bio: Option<&str>,
) -> Result<DbBarber> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating barber: id={}, name={}", id, name);

    let barber = sqlx::query_as::<_, DbBarber>(
        r#"
        INSERT INTO barbers (id, name, photo_url, bio, is_active, created_at)
        VALUES ($1, $2, $3, $4, TRUE, $5)
        RETURNING id, name, photo_url, bio, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(photo_url)
    .bind(bio)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(barber)
}

pub async fn get_barber_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBarber>> {
    let barber = sqlx::query_as::<_, DbBarber>(
        r#"
        SELECT id, name, photo_url, bio, is_active, created_at
        FROM barbers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(barber)
}

pub async fn list_barbers(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<DbBarber>> {
    let barbers = sqlx::query_as::<_, DbBarber>(
        r#"
        SELECT id, name, photo_url, bio, is_active, created_at
        FROM barbers
        WHERE is_active OR NOT $1
        ORDER BY name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(barbers)
}

/// Applies the fields present in `changes`; returns `None` for an unknown id.
pub async fn update_barber(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdateBarberRequest,
) -> Result<Option<DbBarber>> {
    let barber = sqlx::query_as::<_, DbBarber>(
        r#"
        UPDATE barbers
        SET name = COALESCE($2, name),
            photo_url = COALESCE($3, photo_url),
            bio = COALESCE($4, bio),
            is_active = COALESCE($5, is_active)
        WHERE id = $1
        RETURNING id, name, photo_url, bio, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(changes.name.as_deref().map(str::trim))
    .bind(changes.photo_url.as_deref())
    .bind(changes.bio.as_deref())
    .bind(changes.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(barber)
}

pub async fn delete_barber(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM barbers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
