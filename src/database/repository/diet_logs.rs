//! Scoped data access for diet logs. Read shapes nest the log's food items;
//! the (owner, date) uniqueness lives in the schema's unique index.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::manager::DatabaseError;
use crate::database::models::{DietLog, DietLogWithItems, FoodItem};

const UNIQUE_MSG: &str = "a diet log already exists for this date";

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    date: NaiveDate,
) -> Result<DietLog, DatabaseError> {
    sqlx::query_as::<_, DietLog>(
        "INSERT INTO diet_logs (user_id, date) VALUES (?1, ?2)
         RETURNING id, user_id, date",
    )
    .bind(owner_id)
    .bind(date)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_sqlx(e, UNIQUE_MSG))
}

/// List the owner's logs with food items nested, optionally narrowed to one
/// date.
pub async fn list(
    pool: &SqlitePool,
    owner_id: i64,
    date: Option<NaiveDate>,
) -> Result<Vec<DietLogWithItems>, DatabaseError> {
    let logs = match date {
        Some(date) => {
            sqlx::query_as::<_, DietLog>(
                "SELECT id, user_id, date FROM diet_logs
                 WHERE user_id = ?1 AND date = ?2 ORDER BY date",
            )
            .bind(owner_id)
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DietLog>(
                "SELECT id, user_id, date FROM diet_logs WHERE user_id = ?1 ORDER BY date",
            )
            .bind(owner_id)
            .fetch_all(pool)
            .await?
        }
    };

    let items = sqlx::query_as::<_, FoodItem>(
        "SELECT fi.id, fi.diet_log_id, fi.meal_type, fi.name, fi.calories
         FROM food_items fi
         JOIN diet_logs dl ON dl.id = fi.diet_log_id
         WHERE dl.user_id = ?1
         ORDER BY fi.id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    let mut by_log: HashMap<i64, Vec<FoodItem>> = HashMap::new();
    for item in items {
        by_log.entry(item.diet_log_id).or_default().push(item);
    }

    Ok(logs
        .into_iter()
        .map(|log| {
            let items = by_log.remove(&log.id).unwrap_or_default();
            DietLogWithItems::new(log, items)
        })
        .collect())
}

pub async fn get(
    pool: &SqlitePool,
    owner_id: i64,
    id: i64,
) -> Result<DietLogWithItems, DatabaseError> {
    let log = sqlx::query_as::<_, DietLog>(
        "SELECT id, user_id, date FROM diet_logs WHERE id = ?1 AND user_id = ?2",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound("diet log not found".to_string()))?;

    let items = sqlx::query_as::<_, FoodItem>(
        "SELECT id, diet_log_id, meal_type, name, calories
         FROM food_items WHERE diet_log_id = ?1 ORDER BY id",
    )
    .bind(log.id)
    .fetch_all(pool)
    .await?;

    Ok(DietLogWithItems::new(log, items))
}

pub async fn delete(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM diet_logs WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("diet log not found".to_string()));
    }
    Ok(())
}
