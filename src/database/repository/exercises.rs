//! Scoped data access for exercises. Every query filters on the owning
//! user before any secondary predicate, so records outside the caller's
//! ownership chain are indistinguishable from missing ones.

use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::Exercise;

const UNIQUE_MSG: &str = "an exercise with this name already exists";

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    name: &str,
    muscle_group: Option<&str>,
) -> Result<Exercise, DatabaseError> {
    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (user_id, name, muscle_group) VALUES (?1, ?2, ?3)
         RETURNING id, user_id, name, muscle_group",
    )
    .bind(owner_id)
    .bind(name)
    .bind(muscle_group)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_sqlx(e, UNIQUE_MSG))
}

// LIKE metacharacters in the fragment must match literally
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// List the owner's exercises, optionally narrowed by a case-insensitive
/// name substring. SQLite's LIKE is case-insensitive for ASCII.
pub async fn list(
    pool: &SqlitePool,
    owner_id: i64,
    name_like: Option<&str>,
) -> Result<Vec<Exercise>, DatabaseError> {
    let exercises = match name_like {
        Some(fragment) => {
            sqlx::query_as::<_, Exercise>(
                "SELECT id, user_id, name, muscle_group FROM exercises
                 WHERE user_id = ?1 AND name LIKE '%' || ?2 || '%' ESCAPE '\\'
                 ORDER BY name",
            )
            .bind(owner_id)
            .bind(escape_like(fragment))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Exercise>(
                "SELECT id, user_id, name, muscle_group FROM exercises
                 WHERE user_id = ?1 ORDER BY name",
            )
            .bind(owner_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(exercises)
}

pub async fn get(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<Exercise, DatabaseError> {
    sqlx::query_as::<_, Exercise>(
        "SELECT id, user_id, name, muscle_group FROM exercises
         WHERE id = ?1 AND user_id = ?2",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound("exercise not found".to_string()))
}

pub async fn update(
    pool: &SqlitePool,
    owner_id: i64,
    id: i64,
    name: &str,
    muscle_group: Option<&str>,
) -> Result<Exercise, DatabaseError> {
    sqlx::query_as::<_, Exercise>(
        "UPDATE exercises SET name = ?1, muscle_group = ?2
         WHERE id = ?3 AND user_id = ?4
         RETURNING id, user_id, name, muscle_group",
    )
    .bind(name)
    .bind(muscle_group)
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| DatabaseError::from_sqlx(e, UNIQUE_MSG))?
    .ok_or_else(|| DatabaseError::NotFound("exercise not found".to_string()))
}

pub async fn delete(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?1 AND user_id = ?2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("exercise not found".to_string()));
    }
    Ok(())
}
