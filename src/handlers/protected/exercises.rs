use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::Exercise;
use crate::database::repository::exercises;
use crate::database::{DatabaseError, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive name substring
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExercisePayload {
    pub name: String,
    pub muscle_group: Option<String>,
}

impl ExercisePayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::field_error(
                "Invalid exercise fields",
                "name",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

// A name collision is a field-level validation failure, same shape as the
// payload checks above; the unique index decides races in the store
fn duplicate_name_as_field_error(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::UniqueViolation(detail) => {
            ApiError::field_error("Invalid exercise fields", "name", detail)
        }
        other => other.into(),
    }
}

/// GET /api/exercises[?name=substring]
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Exercise>> {
    let pool = DatabaseManager::pool().await?;
    let name = query.name.as_deref().filter(|s| !s.is_empty());
    let exercises = exercises::list(pool, user.user_id, name).await?;
    Ok(ApiResponse::success(exercises))
}

/// POST /api/exercises
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ExercisePayload>,
) -> ApiResult<Exercise> {
    payload.validate()?;
    let pool = DatabaseManager::pool().await?;
    let exercise = exercises::create(
        pool,
        user.user_id,
        payload.name.trim(),
        payload.muscle_group.as_deref(),
    )
    .await
    .map_err(duplicate_name_as_field_error)?;
    Ok(ApiResponse::created(exercise))
}

/// GET /api/exercises/:id
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Exercise> {
    let pool = DatabaseManager::pool().await?;
    let exercise = exercises::get(pool, user.user_id, id).await?;
    Ok(ApiResponse::success(exercise))
}

/// PUT /api/exercises/:id
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<ExercisePayload>,
) -> ApiResult<Exercise> {
    payload.validate()?;
    let pool = DatabaseManager::pool().await?;
    let exercise = exercises::update(
        pool,
        user.user_id,
        id,
        payload.name.trim(),
        payload.muscle_group.as_deref(),
    )
    .await
    .map_err(duplicate_name_as_field_error)?;
    Ok(ApiResponse::success(exercise))
}

/// DELETE /api/exercises/:id
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    exercises::delete(pool, user.user_id, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
