//! Read-only query capabilities the dashboard needs from the database.

use async_trait::async_trait;
use sqlx::AnyPool;

use crate::db::Dialect;
use crate::errors::AppError;
use crate::models::dashboard::{
    BucketCount, Entity, Flag, PopularContent, TimestampColumn, ViewBucket,
};
use crate::models::period::{Bounds, Period, TimeRange};

/// Aggregate queries over the platform tables.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Unconditional row count.
    async fn count(&self, entity: Entity) -> Result<i64, AppError>;

    /// Rows whose boolean `flag` column is true.
    async fn count_flagged(&self, entity: Entity, flag: Flag) -> Result<i64, AppError>;

    /// Rows whose `column` falls inside `range`.
    async fn count_between(
        &self,
        entity: Entity,
        column: TimestampColumn,
        range: TimeRange,
        bounds: Bounds,
    ) -> Result<i64, AppError>;

    /// Row counts grouped by the `period` bucket of `column`, over the
    /// half-open `range`, ascending by label.
    async fn bucket_counts(
        &self,
        entity: Entity,
        column: TimestampColumn,
        period: Period,
        range: TimeRange,
    ) -> Result<Vec<BucketCount>, AppError>;

    /// Content views whose content is VIP.
    async fn count_vip_views(&self) -> Result<i64, AppError>;

    /// Content views per bucket with the VIP share, over the half-open `range`.
    async fn view_buckets(&self, period: Period, range: TimeRange)
        -> Result<Vec<ViewBucket>, AppError>;

    /// Contents ranked by their views counter, highest first.
    async fn popular_content(&self, limit: i64) -> Result<Vec<PopularContent>, AppError>;
}

/// [`StatsStore`] over a SQL pool; the dialect renders backend-specific SQL.
#[derive(Debug, Clone)]
pub struct SqlStatsStore {
    pool: AnyPool,
    dialect: Dialect,
}

impl SqlStatsStore {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    /// `column >= start AND column </<= end` with dialect placeholders 1 and 2.
    fn range_predicate(&self, column: &str, bounds: Bounds) -> String {
        let upper = match bounds {
            Bounds::HalfOpen => "<",
            Bounds::Inclusive => "<=",
        };
        format!(
            "{column} >= {} AND {column} {upper} {}",
            self.dialect.timestamp_placeholder(1),
            self.dialect.timestamp_placeholder(2),
        )
    }
}

#[async_trait]
impl StatsStore for SqlStatsStore {
    async fn count(&self, entity: Entity) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table());
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_flagged(&self, entity: Entity, flag: Flag) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = TRUE",
            entity.table(),
            flag.column()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_between(
        &self,
        entity: Entity,
        column: TimestampColumn,
        range: TimeRange,
        bounds: Bounds,
    ) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            entity.table(),
            self.range_predicate(column.column(), bounds)
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(Dialect::timestamp_value(range.start))
            .bind(Dialect::timestamp_value(range.end))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn bucket_counts(
        &self,
        entity: Entity,
        column: TimestampColumn,
        period: Period,
        range: TimeRange,
    ) -> Result<Vec<BucketCount>, AppError> {
        let bucket = self.dialect.bucket_expression(column.column(), period);
        let sql = format!(
            r#"
            SELECT {bucket} AS date, COUNT(*) AS count
            FROM {table}
            WHERE {predicate}
            GROUP BY {bucket}
            ORDER BY {bucket}
            "#,
            table = entity.table(),
            predicate = self.range_predicate(column.column(), Bounds::HalfOpen),
        );
        let rows = sqlx::query_as::<_, BucketCount>(&sql)
            .bind(Dialect::timestamp_value(range.start))
            .bind(Dialect::timestamp_value(range.end))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_vip_views(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM content_views
            INNER JOIN contents ON content_views.content_id = contents.id
            WHERE contents.is_vip = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn view_buckets(
        &self,
        period: Period,
        range: TimeRange,
    ) -> Result<Vec<ViewBucket>, AppError> {
        let bucket = self
            .dialect
            .bucket_expression("content_views.created_at", period);
        // COUNT over CASE keeps the result BIGINT on every backend, unlike SUM.
        let sql = format!(
            r#"
            SELECT
                {bucket} AS date,
                COUNT(*) AS total_views,
                COUNT(CASE WHEN contents.is_vip = TRUE THEN 1 END) AS vip_views
            FROM content_views
            INNER JOIN contents ON content_views.content_id = contents.id
            WHERE {predicate}
            GROUP BY {bucket}
            ORDER BY {bucket}
            "#,
            predicate = self.range_predicate("content_views.created_at", Bounds::HalfOpen),
        );
        let rows = sqlx::query_as::<_, ViewBucket>(&sql)
            .bind(Dialect::timestamp_value(range.start))
            .bind(Dialect::timestamp_value(range.end))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn popular_content(&self, limit: i64) -> Result<Vec<PopularContent>, AppError> {
        let sql = format!(
            r#"
            SELECT id, title, views_count
            FROM contents
            ORDER BY views_count DESC, id ASC
            LIMIT {}
            "#,
            self.dialect.placeholder(1)
        );
        let rows = sqlx::query_as::<_, PopularContent>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
