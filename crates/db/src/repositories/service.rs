use crate::models::DbService;
use barbershop_core::models::service::ServiceRequest;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

fn duration_column(request: &ServiceRequest) -> Result<i32> {
    i32::try_from(request.duration_minutes)
        .map_err(|_| eyre!("Duration {} is out of range", request.duration_minutes))
}

pub async fn list_services(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, duration_minutes, price_cents, is_active
        FROM services
        WHERE is_active OR NOT $1
        ORDER BY name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, duration_minutes, price_cents, is_active
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn create_service(pool: &Pool<Postgres>, request: &ServiceRequest) -> Result<DbService> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, description, duration_minutes, price_cents, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, duration_minutes, price_cents, is_active
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.trimmed_name())
    .bind(request.normalized_description())
    .bind(duration_column(request)?)
    .bind(request.price_cents)
    .bind(request.is_active)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &ServiceRequest,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, description = $3, duration_minutes = $4, price_cents = $5, is_active = $6
        WHERE id = $1
        RETURNING id, name, description, duration_minutes, price_cents, is_active
        "#,
    )
    .bind(id)
    .bind(request.trimmed_name())
    .bind(request.normalized_description())
    .bind(duration_column(request)?)
    .bind(request.price_cents)
    .bind(request.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
