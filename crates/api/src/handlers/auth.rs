use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use barbershop_core::{
    errors::BookingError,
    models::account::{
        LoginRequest, LoginResponse, MeResponse, ROLE_ADMIN, SignupRequest, User,
    },
    validation::{validate_email, validate_password, validate_required},
};
use barbershop_db::{is_unique_violation, repositories::user};
use chrono::{Duration, Utc};

use crate::{
    ApiState,
    middleware::{
        auth::{CurrentUser, generate_session_token, hash_password, verify_password},
        error_handling::AppError,
    },
};

/// Registers a password account
#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let email = payload.email.trim();
    validate_email(email)?;
    validate_password(&payload.password)?;
    validate_required("Full name", &payload.full_name)?;

    if user::find_user_by_email(&state.db_pool, email).await?.is_some() {
        return Err(already_registered());
    }

    let password_hash = hash_password(&payload.password)?;
    let phone = payload.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());

    let created = user::create_user(
        &state.db_pool,
        email,
        &password_hash,
        payload.full_name.trim(),
        phone,
    )
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            already_registered()
        } else {
            AppError::from(err)
        }
    })?;

    tracing::info!("Registered user {}", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

fn already_registered() -> AppError {
    BookingError::Conflict("Email already registered".to_string()).into()
}

/// Exchanges email and password for a session token
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || BookingError::Authentication("Invalid email or password".to_string());

    let account = user::find_user_by_email(&state.db_pool, payload.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &account.password_hash)? {
        tracing::warn!("Failed login for user {}", account.id);
        return Err(invalid().into());
    }

    user::delete_expired_sessions(&state.db_pool).await?;

    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours);
    user::create_session(&state.db_pool, &token, account.id, expires_at).await?;

    let is_admin = user::has_role(&state.db_pool, account.id, ROLE_ADMIN).await?;

    tracing::info!("User {} signed in", account.id);
    Ok(Json(LoginResponse {
        token,
        expires_at,
        user: account.into(),
        is_admin,
    }))
}

pub async fn logout(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    user::delete_session(&state.db_pool, &current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<MeResponse>, AppError> {
    let is_admin = user::has_role(&state.db_pool, current.user.id, ROLE_ADMIN).await?;

    Ok(Json(MeResponse {
        user: current.user,
        is_admin,
    }))
}
