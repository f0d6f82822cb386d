use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Read shape for sets: the exercise name is resolved via join and echoed
/// onto the record as a derived field.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkoutSetWithExercise {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub date: NaiveDate,
    pub reps: i64,
    pub weight: f64,
}
