use crate::models::{DbAdmin, DbSession, DbUser};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
    full_name: &str,
    phone: Option<&str>,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, email={}", id, email);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, phone, created_at)
        VALUES ($1, LOWER($2), $3, $4, $5, $6)
        RETURNING id, email, password_hash, full_name, phone, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(phone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, password_hash, full_name, phone, created_at
        FROM users
        WHERE email = LOWER($1)
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Grants `role`; granting an existing role is a no-op.
pub async fn grant_role(pool: &Pool<Postgres>, user_id: Uuid, role: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role)
        VALUES ($1, $2)
        ON CONFLICT (user_id, role) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns whether a role was actually removed.
pub async fn revoke_role(pool: &Pool<Postgres>, user_id: Uuid, role: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_roles
        WHERE user_id = $1 AND role = $2
        "#,
    )
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn has_role(pool: &Pool<Postgres>, user_id: Uuid, role: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn list_users_with_role(pool: &Pool<Postgres>, role: &str) -> Result<Vec<DbAdmin>> {
    let admins = sqlx::query_as::<_, DbAdmin>(
        r#"
        SELECT u.id AS user_id, u.email, u.full_name, r.created_at AS granted_at
        FROM user_roles r
        JOIN users u ON u.id = r.user_id
        WHERE r.role = $1
        ORDER BY r.created_at ASC
        "#,
    )
    .bind(role)
    .fetch_all(pool)
    .await?;

    Ok(admins)
}

pub async fn create_session(
    pool: &Pool<Postgres>,
    token: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<DbSession> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, user_id, expires_at, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, user_id, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// The user owning an unexpired session token.
pub async fn find_session_user(pool: &Pool<Postgres>, token: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT u.id, u.email, u.password_hash, u.full_name, u.phone, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > NOW()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_session(pool: &Pool<Postgres>, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_expired_sessions(pool: &Pool<Postgres>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::debug!("Removed {} expired sessions", result.rows_affected());
    }

    Ok(result.rows_affected())
}
