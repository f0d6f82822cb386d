//! Daily summary aggregation: today's sets plus the calorie total of
//! today's diet log. A missing log is a zero total, not an error.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::WorkoutSetWithExercise;
use crate::database::repository::workout_sets;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub sets: Vec<WorkoutSetWithExercise>,
    pub total_calories: i64,
}

pub async fn summary(
    pool: &SqlitePool,
    owner_id: i64,
    today: NaiveDate,
) -> Result<DashboardSummary, DatabaseError> {
    let sets = workout_sets::list(pool, owner_id, Some(today)).await?;

    let total_calories: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(fi.calories), 0)
         FROM food_items fi
         JOIN diet_logs dl ON dl.id = fi.diet_log_id
         WHERE dl.user_id = ?1 AND dl.date = ?2",
    )
    .bind(owner_id)
    .bind(today)
    .fetch_one(pool)
    .await?;

    Ok(DashboardSummary {
        date: today,
        sets,
        total_calories,
    })
}
