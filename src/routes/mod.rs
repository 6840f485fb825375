//! Route definitions for the admin API and pages.

pub mod announces;
pub mod dashboard;
pub mod health;
pub mod views;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/dashboard/overview", get(dashboard::overview))
        .route(
            "/announces",
            get(announces::list).post(announces::create),
        )
        .route(
            "/announces/{id}",
            get(announces::show)
                .put(announces::update)
                .delete(announces::destroy),
        );

    let mut page_routes = Router::new().route("/contents/edit/{id}", get(views::content_edit));
    for &(path, name) in views::PAGES {
        page_routes = page_routes.route(path, views::page(name));
    }

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api_routes)
        .merge(page_routes)
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
