pub mod dashboard;
pub mod diet_logs;
pub mod exercises;
pub mod food_items;
pub mod sets;
