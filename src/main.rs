use std::net::SocketAddr;

use lumen_admin::config::AppConfig;
use lumen_admin::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;
    let dialect = db::Dialect::from_url(&config.database_url);

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!(dialect = %dialect, "Database pool ready");

    if config.run_migrations {
        db::run_migrations(&pool, dialect).await?;
    }

    let host: std::net::IpAddr = config.host.parse()?;
    let addr = SocketAddr::new(host, config.port);
    let app = routes::router(AppState::new(pool, config));

    tracing::info!(host = %addr, "Starting Lumen admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
