use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::WorkoutSetWithExercise;
use crate::database::repository::workout_sets;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact date, YYYY-MM-DD
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SetPayload {
    pub exercise_id: i64,
    pub date: NaiveDate,
    pub reps: i64,
    pub weight: f64,
}

impl SetPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.reps < 1 {
            return Err(ApiError::field_error(
                "Invalid set fields",
                "reps",
                "must be at least 1",
            ));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ApiError::field_error(
                "Invalid set fields",
                "weight",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// GET /api/sets[?date=YYYY-MM-DD]
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<WorkoutSetWithExercise>> {
    let pool = DatabaseManager::pool().await?;
    let sets = workout_sets::list(pool, user.user_id, query.date).await?;
    Ok(ApiResponse::success(sets))
}

/// POST /api/sets
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SetPayload>,
) -> ApiResult<WorkoutSetWithExercise> {
    payload.validate()?;
    let pool = DatabaseManager::pool().await?;
    let set = workout_sets::create(
        pool,
        user.user_id,
        payload.exercise_id,
        payload.date,
        payload.reps,
        payload.weight,
    )
    .await?;
    Ok(ApiResponse::created(set))
}

/// GET /api/sets/:id
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<WorkoutSetWithExercise> {
    let pool = DatabaseManager::pool().await?;
    let set = workout_sets::get(pool, user.user_id, id).await?;
    Ok(ApiResponse::success(set))
}

/// PUT /api/sets/:id
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<SetPayload>,
) -> ApiResult<WorkoutSetWithExercise> {
    payload.validate()?;
    let pool = DatabaseManager::pool().await?;
    let set = workout_sets::update(
        pool,
        user.user_id,
        id,
        payload.exercise_id,
        payload.date,
        payload.reps,
        payload.weight,
    )
    .await?;
    Ok(ApiResponse::success(set))
}

/// DELETE /api/sets/:id
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    workout_sets::delete(pool, user.user_id, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
