//! Scoped data access for workout sets. Reads resolve the exercise name via
//! join; writes verify the referenced exercise through the same ownership
//! filter, so a foreign exercise id fails exactly like a missing one.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::WorkoutSetWithExercise;
use crate::database::repository::exercises;

const SELECT_WITH_EXERCISE: &str = "SELECT ws.id, ws.exercise_id, e.name AS exercise_name,
            ws.date, ws.reps, ws.weight
     FROM workout_sets ws
     JOIN exercises e ON e.id = ws.exercise_id";

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    exercise_id: i64,
    date: NaiveDate,
    reps: i64,
    weight: f64,
) -> Result<WorkoutSetWithExercise, DatabaseError> {
    // Ownership check doubles as existence check; both failures look alike
    let exercise = exercises::get(pool, owner_id, exercise_id).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO workout_sets (user_id, exercise_id, date, reps, weight)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id",
    )
    .bind(owner_id)
    .bind(exercise_id)
    .bind(date)
    .bind(reps)
    .bind(weight)
    .fetch_one(pool)
    .await?;

    Ok(WorkoutSetWithExercise {
        id,
        exercise_id,
        exercise_name: exercise.name,
        date,
        reps,
        weight,
    })
}

/// List the owner's sets ordered by date, optionally narrowed to one date.
pub async fn list(
    pool: &SqlitePool,
    owner_id: i64,
    date: Option<NaiveDate>,
) -> Result<Vec<WorkoutSetWithExercise>, DatabaseError> {
    let sets = match date {
        Some(date) => {
            let sql = format!("{SELECT_WITH_EXERCISE} WHERE ws.user_id = ?1 AND ws.date = ?2 ORDER BY ws.date, ws.id");
            sqlx::query_as::<_, WorkoutSetWithExercise>(&sql)
                .bind(owner_id)
                .bind(date)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{SELECT_WITH_EXERCISE} WHERE ws.user_id = ?1 ORDER BY ws.date, ws.id");
            sqlx::query_as::<_, WorkoutSetWithExercise>(&sql)
                .bind(owner_id)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(sets)
}

pub async fn get(
    pool: &SqlitePool,
    owner_id: i64,
    id: i64,
) -> Result<WorkoutSetWithExercise, DatabaseError> {
    let sql = format!("{SELECT_WITH_EXERCISE} WHERE ws.id = ?1 AND ws.user_id = ?2");
    sqlx::query_as::<_, WorkoutSetWithExercise>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("workout set not found".to_string()))
}

pub async fn update(
    pool: &SqlitePool,
    owner_id: i64,
    id: i64,
    exercise_id: i64,
    date: NaiveDate,
    reps: i64,
    weight: f64,
) -> Result<WorkoutSetWithExercise, DatabaseError> {
    let exercise = exercises::get(pool, owner_id, exercise_id).await?;

    let result = sqlx::query(
        "UPDATE workout_sets SET exercise_id = ?1, date = ?2, reps = ?3, weight = ?4
         WHERE id = ?5 AND user_id = ?6",
    )
    .bind(exercise_id)
    .bind(date)
    .bind(reps)
    .bind(weight)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("workout set not found".to_string()));
    }

    Ok(WorkoutSetWithExercise {
        id,
        exercise_id,
        exercise_name: exercise.name,
        date,
        reps,
        weight,
    })
}

pub async fn delete(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM workout_sets WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("workout set not found".to_string()));
    }
    Ok(())
}
