use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::food_item::FoodItem;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DietLog {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub date: NaiveDate,
}

/// Read shape for diet logs: associated food items nested under the log
#[derive(Debug, Clone, Serialize)]
pub struct DietLogWithItems {
    pub id: i64,
    pub date: NaiveDate,
    pub food_items: Vec<FoodItem>,
}

impl DietLogWithItems {
    pub fn new(log: DietLog, food_items: Vec<FoodItem>) -> Self {
        Self {
            id: log.id,
            date: log.date,
            food_items,
        }
    }
}
