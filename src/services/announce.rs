//! Announcement CRUD.

use chrono::{Local, Timelike};
use sqlx::AnyPool;

use crate::db::Dialect;
use crate::errors::AppError;
use crate::models::announce::{Announce, AnnounceInput, AnnounceRow};

/// Column list with timestamps rendered as text for the current dialect.
fn select_columns(dialect: Dialect) -> String {
    format!(
        "id, title, category, link, img_url, {} AS created_at, {} AS updated_at",
        dialect.timestamp_text("created_at"),
        dialect.timestamp_text("updated_at"),
    )
}

fn now_value() -> String {
    // Whole seconds so stored values round-trip through TIMESTAMP_FORMAT.
    let now = Local::now().naive_local();
    Dialect::timestamp_value(now.with_nanosecond(0).unwrap_or(now))
}

/// All announcements, oldest first.
pub async fn list(pool: &AnyPool, dialect: Dialect) -> Result<Vec<Announce>, AppError> {
    let sql = format!("SELECT {} FROM announces ORDER BY id", select_columns(dialect));
    let rows = sqlx::query_as::<_, AnnounceRow>(&sql)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Announce::try_from).collect()
}

pub async fn find_by_id(pool: &AnyPool, dialect: Dialect, id: i64) -> Result<Announce, AppError> {
    let sql = format!(
        "SELECT {} FROM announces WHERE id = {}",
        select_columns(dialect),
        dialect.placeholder(1)
    );
    sqlx::query_as::<_, AnnounceRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Announce {id} not found")))?
        .try_into()
}

/// Insert a validated announcement and return the stored row.
pub async fn create(
    pool: &AnyPool,
    dialect: Dialect,
    input: &AnnounceInput,
) -> Result<Announce, AppError> {
    let now = now_value();
    let mut sql = format!(
        "INSERT INTO announces (title, category, link, img_url, created_at, updated_at) \
         VALUES ({}, {}, {}, {}, {}, {})",
        dialect.placeholder(1),
        dialect.placeholder(2),
        dialect.placeholder(3),
        dialect.placeholder(4),
        dialect.timestamp_placeholder(5),
        dialect.timestamp_placeholder(6),
    );

    let id = if dialect.supports_returning() {
        sql.push_str(" RETURNING id");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.link)
            .bind(&input.img_url)
            .bind(&now)
            .bind(&now)
            .fetch_one(pool)
            .await?
    } else {
        let result = sqlx::query(&sql)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.link)
            .bind(&input.img_url)
            .bind(&now)
            .bind(&now)
            .execute(pool)
            .await?;
        result.last_insert_id().ok_or_else(|| {
            AppError::Internal("Database did not report the inserted announce id".to_string())
        })?
    };

    tracing::info!(announce_id = id, "Announce created");
    find_by_id(pool, dialect, id).await
}

/// Replace every field of an existing announcement.
pub async fn update(
    pool: &AnyPool,
    dialect: Dialect,
    id: i64,
    input: &AnnounceInput,
) -> Result<Announce, AppError> {
    let existing = find_by_id(pool, dialect, id).await?;

    let sql = format!(
        "UPDATE announces SET title = {}, category = {}, link = {}, img_url = {}, updated_at = {} \
         WHERE id = {}",
        dialect.placeholder(1),
        dialect.placeholder(2),
        dialect.placeholder(3),
        dialect.placeholder(4),
        dialect.timestamp_placeholder(5),
        dialect.placeholder(6),
    );
    sqlx::query(&sql)
        .bind(&input.title)
        .bind(&input.category)
        .bind(&input.link)
        .bind(&input.img_url)
        .bind(now_value())
        .bind(existing.id)
        .execute(pool)
        .await?;

    find_by_id(pool, dialect, existing.id).await
}

pub async fn delete(pool: &AnyPool, dialect: Dialect, id: i64) -> Result<(), AppError> {
    let sql = format!("DELETE FROM announces WHERE id = {}", dialect.placeholder(1));
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Announce {id} not found")));
    }

    tracing::info!(announce_id = id, "Announce deleted");
    Ok(())
}
