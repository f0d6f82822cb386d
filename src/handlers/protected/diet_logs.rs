use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::{DietLog, DietLogWithItems};
use crate::database::repository::diet_logs;
use crate::database::{DatabaseError, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct DietLogPayload {
    pub date: NaiveDate,
}

/// GET /api/dietlogs[?date=YYYY-MM-DD] - logs with food items nested
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<DietLogWithItems>> {
    let pool = DatabaseManager::pool().await?;
    let logs = diet_logs::list(pool, user.user_id, query.date).await?;
    Ok(ApiResponse::success(logs))
}

/// POST /api/dietlogs - at most one log per date; a second log for the same
/// date is a field-level validation failure
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<DietLogPayload>,
) -> ApiResult<DietLog> {
    let pool = DatabaseManager::pool().await?;
    let log = diet_logs::create(pool, user.user_id, payload.date)
        .await
        .map_err(|err| match err {
            DatabaseError::UniqueViolation(detail) => {
                ApiError::field_error("Invalid diet log fields", "date", detail)
            }
            other => other.into(),
        })?;
    Ok(ApiResponse::created(log))
}

/// GET /api/dietlogs/:id
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<DietLogWithItems> {
    let pool = DatabaseManager::pool().await?;
    let log = diet_logs::get(pool, user.user_id, id).await?;
    Ok(ApiResponse::success(log))
}

/// DELETE /api/dietlogs/:id - cascades to the log's food items
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    diet_logs::delete(pool, user.user_id, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
