pub mod diet_log;
pub mod exercise;
pub mod food_item;
pub mod user;
pub mod workout_set;

pub use diet_log::{DietLog, DietLogWithItems};
pub use exercise::Exercise;
pub use food_item::{FoodItem, MealType};
pub use user::User;
pub use workout_set::WorkoutSetWithExercise;
