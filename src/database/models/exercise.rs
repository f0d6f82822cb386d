use serde::Serialize;
use sqlx::FromRow;

/// A named movement type, unique per (owner, name)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub name: String,
    pub muscle_group: Option<String>,
}
