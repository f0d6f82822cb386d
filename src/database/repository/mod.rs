//! Per-entity data access. Every function takes the pool and the owning
//! principal explicitly; ownership filtering happens here, before any
//! secondary filter, so handlers never see another user's rows.

pub mod dashboard;
pub mod diet_logs;
pub mod exercises;
pub mod food_items;
pub mod users;
pub mod workout_sets;
