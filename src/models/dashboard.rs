//! Dashboard entities and the overview response DTOs.

use serde::Serialize;

use crate::models::period::Period;

/// Read-only entity tables the dashboard reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Device,
    Content,
    ContentView,
    Subscription,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::Device => "devices",
            Entity::Content => "contents",
            Entity::ContentView => "content_views",
            Entity::Subscription => "subscriptions",
        }
    }
}

/// Boolean classification columns that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `is_vip` on devices and contents.
    Vip,
    /// `is_active` on subscriptions.
    Active,
}

impl Flag {
    pub fn column(&self) -> &'static str {
        match self {
            Flag::Vip => "is_vip",
            Flag::Active => "is_active",
        }
    }
}

/// Timestamp columns used for range filters and bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampColumn {
    #[default]
    CreatedAt,
    LastActiveAt,
}

impl TimestampColumn {
    pub fn column(&self) -> &'static str {
        match self {
            TimestampColumn::CreatedAt => "created_at",
            TimestampColumn::LastActiveAt => "last_active_at",
        }
    }
}

/// One point of a generic time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BucketCount {
    pub date: String,
    pub count: i64,
}

/// One point of the content view series with its VIP share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ViewBucket {
    pub date: String,
    pub total_views: i64,
    pub vip_views: i64,
}

/// Ranked content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PopularContent {
    pub id: i64,
    pub title: String,
    pub views_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub change_percentage: f64,
    pub chart: Vec<BucketCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceStats {
    pub total: i64,
    pub vip_devices: i64,
    pub daily_active: i64,
    pub change_percentage: f64,
    pub chart: Vec<BucketCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentStats {
    pub total: i64,
    pub vip_content: i64,
    pub popular_content: Vec<PopularContent>,
    pub change_percentage: f64,
    pub chart: Vec<BucketCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStats {
    pub total: i64,
    pub active: i64,
    pub change_percentage: f64,
    pub chart: Vec<BucketCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewStats {
    pub total: i64,
    pub vip_views: i64,
    pub change_percentage: f64,
    pub chart: Vec<ViewBucket>,
}

/// Response metadata.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewMeta {
    pub time_range: Period,
    pub last_updated: String,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub users: UserStats,
    pub devices: DeviceStats,
    pub content: ContentStats,
    pub subscriptions: SubscriptionStats,
    pub views: ViewStats,
    pub meta: OverviewMeta,
}
