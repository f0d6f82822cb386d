use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Meal categories, stored as their display names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum MealType {
    #[sqlx(rename = "Breakfast")]
    Breakfast,
    #[sqlx(rename = "Lunch")]
    Lunch,
    #[sqlx(rename = "Dinner")]
    Dinner,
    #[sqlx(rename = "Snacks")]
    Snacks,
}

/// One food entry within a meal. Carries no user column; ownership is
/// resolved through the parent diet log.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodItem {
    pub id: i64,
    pub diet_log_id: i64,
    pub meal_type: MealType,
    pub name: String,
    pub calories: i64,
}
