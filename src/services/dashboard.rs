//! Dashboard statistics: period comparisons, time series and the overview.

use chrono::NaiveDateTime;

use crate::db::dialect::TIMESTAMP_FORMAT;
use crate::errors::AppError;
use crate::models::dashboard::{
    BucketCount, ContentStats, DashboardOverview, DeviceStats, Entity, Flag, OverviewMeta,
    SubscriptionStats, TimestampColumn, UserStats, ViewBucket, ViewStats,
};
use crate::models::period::{Bounds, Period, TimeRange};
use crate::services::stats_store::StatsStore;

/// Number of entries in the popular content ranking.
pub const POPULAR_CONTENT_LIMIT: i64 = 5;

/// Percentage change from `previous` to `current`, rounded to 2 decimals.
///
/// A previous count of zero has no meaningful ratio: any growth reports a
/// flat 100% and no activity reports 0%.
pub fn change_percentage(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }

    // Hundredths of a percent, rounded half away from zero in integers so
    // exact halves such as 14.375 are not lost to binary fractions.
    let n = (current - previous) * 10_000;
    let hundredths = (2 * n + n.signum() * previous) / (2 * previous);
    hundredths as f64 / 100.0
}

/// Compare `entity` creations in the current period against the one before.
pub async fn percentage_change(
    store: &dyn StatsStore,
    entity: Entity,
    period: Period,
    now: NaiveDateTime,
) -> Result<f64, AppError> {
    let (current, previous) = tokio::try_join!(
        store.count_between(
            entity,
            TimestampColumn::CreatedAt,
            period.current_range(now),
            Bounds::HalfOpen,
        ),
        store.count_between(
            entity,
            TimestampColumn::CreatedAt,
            period.previous_range(now),
            Bounds::HalfOpen,
        ),
    )?;

    Ok(change_percentage(current, previous))
}

/// Rows of `entity` over the current period, grouped into buckets by `column`.
pub async fn time_series(
    store: &dyn StatsStore,
    entity: Entity,
    column: TimestampColumn,
    period: Period,
    now: NaiveDateTime,
) -> Result<Vec<BucketCount>, AppError> {
    let mut series = store
        .bucket_counts(
            entity,
            column,
            period,
            period.current_range(now),
        )
        .await?;
    series.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(series)
}

/// Content views over the current period with the VIP share per bucket.
pub async fn view_time_series(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<Vec<ViewBucket>, AppError> {
    let mut series = store
        .view_buckets(period, period.current_range(now))
        .await?;
    series.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(series)
}

pub async fn user_stats(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<UserStats, AppError> {
    let (total, change_percentage, chart) = tokio::try_join!(
        store.count(Entity::User),
        percentage_change(store, Entity::User, period, now),
        time_series(
            store,
            Entity::User,
            TimestampColumn::CreatedAt,
            period,
            now,
        ),
    )?;

    Ok(UserStats {
        total,
        change_percentage,
        chart,
    })
}

/// Device totals, VIP devices and devices seen today.
pub async fn device_stats(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<DeviceStats, AppError> {
    let (total, vip_devices, daily_active, change_percentage, chart) = tokio::try_join!(
        store.count(Entity::Device),
        store.count_flagged(Entity::Device, Flag::Vip),
        store.count_between(
            Entity::Device,
            TimestampColumn::LastActiveAt,
            TimeRange::day_of(now),
            Bounds::Inclusive,
        ),
        percentage_change(store, Entity::Device, period, now),
        time_series(
            store,
            Entity::Device,
            TimestampColumn::CreatedAt,
            period,
            now,
        ),
    )?;

    Ok(DeviceStats {
        total,
        vip_devices,
        daily_active,
        change_percentage,
        chart,
    })
}

pub async fn content_stats(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<ContentStats, AppError> {
    let (total, vip_content, popular_content, change_percentage, chart) = tokio::try_join!(
        store.count(Entity::Content),
        store.count_flagged(Entity::Content, Flag::Vip),
        store.popular_content(POPULAR_CONTENT_LIMIT),
        percentage_change(store, Entity::Content, period, now),
        time_series(
            store,
            Entity::Content,
            TimestampColumn::CreatedAt,
            period,
            now,
        ),
    )?;

    Ok(ContentStats {
        total,
        vip_content,
        popular_content,
        change_percentage,
        chart,
    })
}

pub async fn subscription_stats(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<SubscriptionStats, AppError> {
    let (total, active, change_percentage, chart) = tokio::try_join!(
        store.count(Entity::Subscription),
        store.count_flagged(Entity::Subscription, Flag::Active),
        percentage_change(store, Entity::Subscription, period, now),
        time_series(
            store,
            Entity::Subscription,
            TimestampColumn::CreatedAt,
            period,
            now,
        ),
    )?;

    Ok(SubscriptionStats {
        total,
        active,
        change_percentage,
        chart,
    })
}

pub async fn view_stats(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<ViewStats, AppError> {
    let (total, vip_views, change_percentage, chart) = tokio::try_join!(
        store.count(Entity::ContentView),
        store.count_vip_views(),
        percentage_change(store, Entity::ContentView, period, now),
        view_time_series(store, period, now),
    )?;

    Ok(ViewStats {
        total,
        vip_views,
        change_percentage,
        chart,
    })
}

/// Build the full dashboard for `period` as seen at `now`.
///
/// The five sections are independent and computed concurrently; the first
/// failing query fails the whole overview.
pub async fn overview(
    store: &dyn StatsStore,
    period: Period,
    now: NaiveDateTime,
) -> Result<DashboardOverview, AppError> {
    tracing::debug!(period = %period, now = %now, "Building dashboard overview");

    let (users, devices, content, subscriptions, views) = tokio::try_join!(
        user_stats(store, period, now),
        device_stats(store, period, now),
        content_stats(store, period, now),
        subscription_stats(store, period, now),
        view_stats(store, period, now),
    )?;

    Ok(DashboardOverview {
        users,
        devices,
        content,
        subscriptions,
        views,
        meta: OverviewMeta {
            time_range: period,
            last_updated: now.format(TIMESTAMP_FORMAT).to_string(),
        },
    })
}
