//! Database models and DTOs for all domain entities.

pub mod announce;
pub mod dashboard;
pub mod period;
