pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::AnyPool;

use crate::db::Dialect;
use crate::services::stats_store::{SqlStatsStore, StatsStore};

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: AnyPool,
    pub dialect: Dialect,
    pub stats: Arc<dyn StatsStore>,
    pub config: config::AppConfig,
}

impl AppState {
    /// State backed by `db`, with dashboard queries rendered for the
    /// dialect of the configured database URL.
    pub fn new(db: AnyPool, config: config::AppConfig) -> Self {
        let dialect = Dialect::from_url(&config.database_url);
        let stats: Arc<dyn StatsStore> = Arc::new(SqlStatsStore::new(db.clone(), dialect));
        Self {
            db,
            dialect,
            stats,
            config,
        }
    }
}
