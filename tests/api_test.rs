//! HTTP-level tests: the full Axum app on a random port over in-memory SQLite.

mod common;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode as AxumStatus};
use lumen_admin::errors::AppError;
use lumen_admin::models::dashboard::{
    BucketCount, Entity, Flag, PopularContent, TimestampColumn, ViewBucket,
};
use lumen_admin::models::period::{Bounds, Period, TimeRange};
use lumen_admin::services::stats_store::StatsStore;
use lumen_admin::{routes, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Spin up the full Axum app on a random port against a fresh in-memory
/// database, returning the base URL and a handle to stop the server.
async fn start_server() -> (String, tokio::task::JoinHandle<()>) {
    let pool = common::memory_pool().await;
    common::insert_user(&pool, "2024-01-02 09:00:00").await;
    let state = AppState::new(pool, common::test_config());
    let app = routes::router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (base_url, handle)
}

#[tokio::test]
async fn health_live() {
    let (base, _handle) = start_server().await;
    let resp = Client::new()
        .get(format!("{base}/health/live"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn health_ready_reports_database() {
    let (base, _handle) = start_server().await;
    let body: Value = Client::new()
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn overview_defaults_to_month() {
    let (base, _handle) = start_server().await;
    let resp = Client::new()
        .get(format!("{base}/api/dashboard/overview"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["meta"]["time_range"], "month");
    assert!(body["meta"]["last_updated"].is_string());
    assert_eq!(body["users"]["total"], 1);
    for section in ["users", "devices", "content", "subscriptions", "views"] {
        assert!(body[section]["chart"].is_array(), "{section}");
        assert!(body[section]["change_percentage"].is_number(), "{section}");
    }
    assert!(body["devices"]["daily_active"].is_i64());
    assert!(body["content"]["popular_content"].is_array());
    assert!(body["views"]["vip_views"].is_i64());
}

#[tokio::test]
async fn overview_accepts_each_period() {
    let (base, _handle) = start_server().await;
    let client = Client::new();
    for period in Period::ALL {
        let body: Value = client
            .get(format!("{base}/api/dashboard/overview?time_range={period}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["meta"]["time_range"], period.as_str());
    }
}

#[tokio::test]
async fn overview_rejects_unknown_period() {
    let (base, _handle) = start_server().await;
    let resp = Client::new()
        .get(format!("{base}/api/dashboard/overview?time_range=bogus"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].is_null());
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

/// Store that records every call and answers with empty data.
#[derive(Default)]
struct CountingStore {
    calls: AtomicUsize,
}

impl CountingStore {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StatsStore for CountingStore {
    async fn count(&self, _entity: Entity) -> Result<i64, AppError> {
        self.hit();
        Ok(0)
    }
    async fn count_flagged(&self, _entity: Entity, _flag: Flag) -> Result<i64, AppError> {
        self.hit();
        Ok(0)
    }
    async fn count_between(
        &self,
        _entity: Entity,
        _column: TimestampColumn,
        _range: TimeRange,
        _bounds: Bounds,
    ) -> Result<i64, AppError> {
        self.hit();
        Ok(0)
    }
    async fn bucket_counts(
        &self,
        _entity: Entity,
        _column: TimestampColumn,
        _period: Period,
        _range: TimeRange,
    ) -> Result<Vec<BucketCount>, AppError> {
        self.hit();
        Ok(Vec::new())
    }
    async fn count_vip_views(&self) -> Result<i64, AppError> {
        self.hit();
        Ok(0)
    }
    async fn view_buckets(
        &self,
        _period: Period,
        _range: TimeRange,
    ) -> Result<Vec<ViewBucket>, AppError> {
        self.hit();
        Ok(Vec::new())
    }
    async fn popular_content(&self, _limit: i64) -> Result<Vec<PopularContent>, AppError> {
        self.hit();
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn invalid_period_never_reaches_the_store() {
    let store = Arc::new(CountingStore::default());
    let mut state = AppState::new(common::memory_pool().await, common::test_config());
    state.stats = store.clone();
    let app = routes::router(state);

    let resp = app
        .clone()
        .oneshot(
            Request::get("/api/dashboard/overview?time_range=bogus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), AxumStatus::BAD_REQUEST);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);

    let resp = app
        .oneshot(
            Request::get("/api/dashboard/overview")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), AxumStatus::OK);
    assert!(store.calls.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn announce_crud_round_trip() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    // Empty list
    let list: Vec<Value> = client
        .get(format!("{base}/api/announces"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());

    // Create
    let resp = client
        .post(format!("{base}/api/announces"))
        .json(&json!({
            "title": "Season 2 is live",
            "category": "news",
            "link": "https://lumen.example/s2",
            "imgUrl": "https://cdn.lumen.example/s2.png"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Season 2 is live");
    assert_eq!(created["imgUrl"], "https://cdn.lumen.example/s2.png");

    // Show
    let shown: Value = client
        .get(format!("{base}/api/announces/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown["category"], "news");

    // Update replaces every field
    let resp = client
        .put(format!("{base}/api/announces/{id}"))
        .json(&json!({ "title": "Season 2 finale", "category": "promotion" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Season 2 finale");
    assert!(updated["link"].is_null());
    assert!(updated["imgUrl"].is_null());

    // Delete
    let deleted: Value = client
        .delete(format!("{base}/api/announces/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted["message"], "Deleted successfully");

    let resp = client
        .get(format!("{base}/api/announces/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn announce_validation_errors() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{base}/api/announces"))
        .json(&json!({ "title": "", "category": "news" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("title"));

    let resp = client
        .post(format!("{base}/api/announces"))
        .json(&json!({ "title": "No category" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base}/api/announces"))
        .json(&json!({ "title": "t", "category": "c", "link": "x".repeat(256) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .put(format!("{base}/api/announces/999"))
        .json(&json!({ "title": "t", "category": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base}/api/announces/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn view_routes_serve_the_shell() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let resp = client.get(format!("{base}/devices")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"data-page="devices""#));
    assert!(html.contains("<title>Lumen + Admin</title>"));

    let html = client
        .get(format!("{base}/contents/edit/42"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"data-page="content-edit" data-id="42""#));

    let html = client
        .get(format!("{base}/livesports"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"data-page="live-sport""#));
}
