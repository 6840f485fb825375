//! Business logic services.

pub mod announce;
pub mod dashboard;
pub mod stats_store;
