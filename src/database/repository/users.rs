use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_sqlx(e, "username already taken"))
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;

    #[tokio::test]
    async fn duplicate_username_hits_unique_index() {
        let pool = test_pool().await;
        create(&pool, "user1", "hash").await.expect("first insert");

        let err = create(&pool, "user1", "other-hash").await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));

        let found = find_by_username(&pool, "user1").await.expect("query");
        assert_eq!(found.expect("exists").password_hash, "hash");
    }

    #[tokio::test]
    async fn unknown_username_is_none() {
        let pool = test_pool().await;
        assert!(find_by_username(&pool, "ghost").await.expect("query").is_none());
    }
}
