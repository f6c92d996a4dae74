//! Administrator management.
//!
//! Administrators are ordinary accounts holding the `admin` role. The first
//! one is created at startup from the bootstrap credentials; after that,
//! admins add and remove each other here.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use barbershop_core::{
    errors::{BookingError, BookingResult},
    models::account::{AdminSummary, CreateAdminRequest, ROLE_ADMIN},
    validation::{validate_email, validate_password},
};
use barbershop_db::{DbPool, repositories::user};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::{AdminUser, hash_password},
        error_handling::AppError,
    },
};

/// Makes sure an account exists for `email` and holds the admin role.
///
/// Existing accounts keep their password; new ones are created with the given
/// password and the local part of the email as their name.
pub async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> BookingResult<Uuid> {
    let email = email.trim();

    let user_id = match user::find_user_by_email(pool, email).await? {
        Some(existing) => existing.id,
        None => {
            validate_email(email)?;
            validate_password(password)?;

            let full_name = email.split('@').next().unwrap_or(email);
            let password_hash = hash_password(password)?;
            user::create_user(pool, email, &password_hash, full_name, None)
                .await?
                .id
        }
    };

    user::grant_role(pool, user_id, ROLE_ADMIN).await?;
    Ok(user_id)
}

pub async fn list_admins(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<AdminSummary>>, AppError> {
    let admins = user::list_users_with_role(&state.db_pool, ROLE_ADMIN).await?;
    Ok(Json(admins.into_iter().map(AdminSummary::from).collect()))
}

#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<Arc<ApiState>>,
    AdminUser(granted_by): AdminUser,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminSummary>), AppError> {
    let user_id = ensure_admin(&state.db_pool, &payload.email, &payload.password).await?;

    let summary = user::list_users_with_role(&state.db_pool, ROLE_ADMIN)
        .await?
        .into_iter()
        .find(|admin| admin.user_id == user_id)
        .map(AdminSummary::from)
        .ok_or_else(|| BookingError::NotFound(format!("Admin {} not found", user_id)))?;

    tracing::info!("User {} granted admin to {}", granted_by.id, user_id);
    Ok((StatusCode::CREATED, Json(summary)))
}

#[axum::debug_handler]
pub async fn remove_admin(
    State(state): State<Arc<ApiState>>,
    AdminUser(current): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if user_id == current.id {
        return Err(
            BookingError::Validation("You cannot remove your own admin role".to_string()).into(),
        );
    }

    if !user::revoke_role(&state.db_pool, user_id, ROLE_ADMIN).await? {
        return Err(BookingError::NotFound(format!("Admin {} not found", user_id)).into());
    }

    tracing::info!("User {} revoked admin from {}", current.id, user_id);
    Ok(StatusCode::NO_CONTENT)
}
