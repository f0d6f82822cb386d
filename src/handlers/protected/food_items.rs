use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use crate::database::models::{FoodItem, MealType};
use crate::database::repository::food_items;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct FoodItemPayload {
    pub diet_log_id: i64,
    pub meal_type: MealType,
    pub name: String,
    pub calories: i64,
}

impl FoodItemPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::field_error(
                "Invalid food item fields",
                "name",
                "must not be empty",
            ));
        }
        if self.calories < 0 {
            return Err(ApiError::field_error(
                "Invalid food item fields",
                "calories",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// GET /api/fooditems - all of the caller's items, scoped through parent logs
pub async fn list(Extension(user): Extension<AuthUser>) -> ApiResult<Vec<FoodItem>> {
    let pool = DatabaseManager::pool().await?;
    let items = food_items::list(pool, user.user_id).await?;
    Ok(ApiResponse::success(items))
}

/// POST /api/fooditems - parent log must belong to the caller
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<FoodItemPayload>,
) -> ApiResult<FoodItem> {
    payload.validate()?;
    let pool = DatabaseManager::pool().await?;
    let item = food_items::create(
        pool,
        user.user_id,
        payload.diet_log_id,
        payload.meal_type,
        payload.name.trim(),
        payload.calories,
    )
    .await?;
    Ok(ApiResponse::created(item))
}

/// GET /api/fooditems/:id
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<FoodItem> {
    let pool = DatabaseManager::pool().await?;
    let item = food_items::get(pool, user.user_id, id).await?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/fooditems/:id
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    food_items::delete(pool, user.user_id, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
