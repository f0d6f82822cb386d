use sqlx::FromRow;

/// Account row. Never serialized directly; response shapes pick the fields
/// they expose so the hash cannot leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
