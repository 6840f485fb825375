//! Database connection pool and migration utilities.

pub mod dialect;

use sqlx::any::AnyPoolOptions;
use sqlx::migrate::MigrateError;
use sqlx::AnyPool;

pub use dialect::Dialect;

/// Create a connection pool for any supported backend (Postgres, MySQL, SQLite).
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply the migration set matching `dialect`.
pub async fn run_migrations(pool: &AnyPool, dialect: Dialect) -> Result<(), MigrateError> {
    tracing::info!(dialect = %dialect, "Running database migrations");
    match dialect {
        Dialect::Postgres => sqlx::migrate!("./migrations/postgres").run(pool).await,
        Dialect::MySql => sqlx::migrate!("./migrations/mysql").run(pool).await,
        Dialect::Sqlite => sqlx::migrate!("./migrations/sqlite").run(pool).await,
    }
}
