//! Scoped data access for food items. These rows carry no user column, so
//! every operation resolves ownership through the parent diet log. A parent
//! id that does not exist and one that belongs to another user produce the
//! identical not-found failure.

use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::{FoodItem, MealType};

async fn parent_log_id(
    pool: &SqlitePool,
    owner_id: i64,
    diet_log_id: i64,
) -> Result<i64, DatabaseError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM diet_logs WHERE id = ?1 AND user_id = ?2")
        .bind(diet_log_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("diet log not found".to_string()))
}

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    diet_log_id: i64,
    meal_type: MealType,
    name: &str,
    calories: i64,
) -> Result<FoodItem, DatabaseError> {
    let log_id = parent_log_id(pool, owner_id, diet_log_id).await?;

    let item = sqlx::query_as::<_, FoodItem>(
        "INSERT INTO food_items (diet_log_id, meal_type, name, calories)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, diet_log_id, meal_type, name, calories",
    )
    .bind(log_id)
    .bind(meal_type)
    .bind(name)
    .bind(calories)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn list(pool: &SqlitePool, owner_id: i64) -> Result<Vec<FoodItem>, DatabaseError> {
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
    Ok(items)
}

pub async fn get(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<FoodItem, DatabaseError> {
    sqlx::query_as::<_, FoodItem>(
        "SELECT fi.id, fi.diet_log_id, fi.meal_type, fi.name, fi.calories
         FROM food_items fi
         JOIN diet_logs dl ON dl.id = fi.diet_log_id
         WHERE fi.id = ?1 AND dl.user_id = ?2",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound("food item not found".to_string()))
}

pub async fn delete(pool: &SqlitePool, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "DELETE FROM food_items
         WHERE id = ?1
           AND diet_log_id IN (SELECT id FROM diet_logs WHERE user_id = ?2)",
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("food item not found".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::{diet_logs, users};
    use crate::testing::test_pool;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn create_attaches_to_owned_log() {
        let pool = test_pool().await;
        let user = users::create(&pool, "user1", "hash").await.expect("user");
        let log = diet_logs::create(&pool, user.id, date("2025-11-04")).await.expect("log");

        let item = create(&pool, user.id, log.id, MealType::Snacks, "Apple", 95)
            .await
            .expect("item");
        assert_eq!(item.name, "Apple");
        assert_eq!(item.calories, 95);
        assert_eq!(item.meal_type, MealType::Snacks);
    }

    #[tokio::test]
    async fn foreign_parent_log_is_indistinguishable_from_missing() {
        let pool = test_pool().await;
        let a = users::create(&pool, "user1", "hash").await.expect("user");
        let b = users::create(&pool, "user2", "hash").await.expect("user");
        let theirs = diet_logs::create(&pool, a.id, date("2025-11-04")).await.expect("log");

        let foreign = create(&pool, b.id, theirs.id, MealType::Lunch, "Rice", 300)
            .await
            .unwrap_err();
        let missing = create(&pool, b.id, 9999, MealType::Lunch, "Rice", 300)
            .await
            .unwrap_err();

        assert_eq!(foreign.to_string(), missing.to_string());

        // And nothing was created under the other user's log
        let items = list(&pool, a.id).await.expect("list");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn reads_and_deletes_are_scoped_through_parent() {
        let pool = test_pool().await;
        let a = users::create(&pool, "user1", "hash").await.expect("user");
        let b = users::create(&pool, "user2", "hash").await.expect("user");
        let log = diet_logs::create(&pool, a.id, date("2025-11-04")).await.expect("log");
        let item = create(&pool, a.id, log.id, MealType::Breakfast, "Oats", 250)
            .await
            .expect("item");

        assert!(list(&pool, b.id).await.expect("list").is_empty());
        assert!(matches!(get(&pool, b.id, item.id).await.unwrap_err(), DatabaseError::NotFound(_)));
        assert!(matches!(delete(&pool, b.id, item.id).await.unwrap_err(), DatabaseError::NotFound(_)));

        delete(&pool, a.id, item.id).await.expect("owner delete");
        assert!(list(&pool, a.id).await.expect("list").is_empty());
    }
}
