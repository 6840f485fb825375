//! Shared fixtures: an in-memory SQLite database with the full schema.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use lumen_admin::config::AppConfig;
use lumen_admin::db::{self, Dialect};
use sqlx::AnyPool;

pub const MEMORY_URL: &str = "sqlite::memory:";

/// 2024-01-15 15:00:00, the reference "now" for every fixture.
pub fn now() -> NaiveDateTime {
    at("2024-01-15 15:00:00")
}

pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("fixture timestamp")
}

/// Fresh migrated database. A single connection keeps the in-memory
/// database alive and shared for the whole test.
pub async fn memory_pool() -> AnyPool {
    let pool = db::create_pool(MEMORY_URL, 1).await.expect("pool");
    db::run_migrations(&pool, Dialect::Sqlite)
        .await
        .expect("migrations");
    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: MEMORY_URL.to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        assets_dir: "public/assets".to_string(),
        app_title: "Lumen + Admin".to_string(),
        run_migrations: true,
    }
}

pub async fn insert_user(pool: &AnyPool, created_at: &str) {
    sqlx::query("INSERT INTO users (name, created_at, updated_at) VALUES (?, ?, ?)")
        .bind("viewer")
        .bind(created_at)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("insert user");
}

pub async fn insert_device(
    pool: &AnyPool,
    device_id: &str,
    is_vip: bool,
    last_active_at: Option<&str>,
    created_at: &str,
) {
    sqlx::query(
        "INSERT INTO devices (device_id, is_vip, last_active_at, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(device_id)
    .bind(is_vip)
    .bind(last_active_at)
    .bind(created_at)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("insert device");
}

pub async fn insert_content(
    pool: &AnyPool,
    title: &str,
    is_vip: bool,
    views_count: i64,
    created_at: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO contents (title, is_vip, views_count, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(is_vip)
    .bind(views_count)
    .bind(created_at)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("insert content")
}

pub async fn insert_view(pool: &AnyPool, content_id: i64, created_at: &str) {
    sqlx::query("INSERT INTO content_views (content_id, created_at) VALUES (?, ?)")
        .bind(content_id)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("insert view");
}

pub async fn insert_subscription(pool: &AnyPool, is_active: bool, created_at: &str) {
    sqlx::query("INSERT INTO subscriptions (is_active, created_at, updated_at) VALUES (?, ?, ?)")
        .bind(is_active)
        .bind(created_at)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("insert subscription");
}
