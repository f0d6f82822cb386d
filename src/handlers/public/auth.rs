//! Registration and token issuance. The only endpoints reachable without a
//! bearer token.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::config;
use crate::database::repository::users;
use crate::database::{DatabaseError, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::field_error(
                "Invalid registration fields",
                "username",
                "must not be empty",
            ));
        }
        let min_len = config::config().security.min_password_len;
        if self.password.chars().count() < min_len {
            return Err(ApiError::field_error(
                "Invalid registration fields",
                "password",
                format!("must be at least {} characters", min_len),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/register - create a new user account
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<RegisterResponse> {
    payload.validate()?;

    let hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to register user")
    })?;

    let pool = DatabaseManager::pool().await?;
    let user = match users::create(pool, payload.username.trim(), &hash).await {
        Ok(user) => user,
        // Duplicate usernames surface as field-level validation errors, and
        // the unique index is what decides races, not a pre-check here
        Err(DatabaseError::UniqueViolation(_)) => {
            return Err(ApiError::field_error(
                "Invalid registration fields",
                "username",
                "already taken",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Registered user: {}", user.username);
    Ok(ApiResponse::created(RegisterResponse {
        id: user.id,
        username: user.username,
    }))
}

/// POST /api/token - exchange credentials for a bearer token
///
/// Unknown usernames and wrong passwords produce the same 401.
pub async fn token(Json(payload): Json<TokenRequest>) -> ApiResult<TokenResponse> {
    let pool = DatabaseManager::pool().await?;

    // Registration stores the trimmed username; look it up the same way
    let user = users::find_by_username(pool, payload.username.trim()).await?;
    let authenticated = user
        .filter(|u| verify_password(&payload.password, &u.password_hash))
        .ok_or_else(|| {
            tracing::debug!("Failed login attempt for username: {}", payload.username);
            ApiError::unauthorized("Invalid credentials")
        })?;

    let claims = Claims::new(authenticated.username, authenticated.id);
    let token = generate_jwt(claims)?;

    Ok(ApiResponse::success(TokenResponse { token }))
}
