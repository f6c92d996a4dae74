//! # Authentication Module
//!
//! Password hashing with Argon2, opaque session tokens, and the extractors
//! handlers use to identify the caller:
//!
//! - [`CurrentUser`]: a valid bearer session is required (401 otherwise)
//! - [`AdminUser`]: additionally requires the `admin` role (403 otherwise)
//! - [`MaybeUser`]: the session is optional; invalid tokens are ignored

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use barbershop_core::{
    errors::BookingError,
    models::account::{ROLE_ADMIN, User},
};
use barbershop_db::repositories::user;
use eyre::Result;
use rand::{Rng, distributions::Alphanumeric};

use crate::{ApiState, middleware::error_handling::AppError};

const SESSION_TOKEN_LEN: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format (algorithm, parameters, salt and hash).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Stored password hash is invalid: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// The token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The signed-in user together with the session token that identified them.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| BookingError::Authentication("Missing bearer token".to_string()))?
            .to_string();

        let user = user::find_session_user(&state.db_pool, &token)
            .await?
            .ok_or_else(|| BookingError::Authentication("Invalid or expired session".to_string()))?;

        Ok(CurrentUser {
            user: user.into(),
            token,
        })
    }
}

/// A signed-in user holding the `admin` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;

        if !user::has_role(&state.db_pool, user.id, ROLE_ADMIN).await? {
            tracing::warn!("User {} attempted an admin action", user.id);
            return Err(BookingError::Authorization("Admin access required".to_string()).into());
        }

        Ok(AdminUser(user))
    }
}

/// The signed-in user when a valid session is presented, otherwise `None`.
/// A failed session lookup is logged and treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };

        match user::find_session_user(&state.db_pool, token).await {
            Ok(user) => Ok(MaybeUser(user.map(User::from))),
            Err(err) => {
                tracing::warn!("Session lookup failed, continuing anonymously: {}", err);
                Ok(MaybeUser(None))
            }
        }
    }
}
