//! Seed script for development. Populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env). Rows are
//! spread deterministically over the last year so every dashboard period
//! has something to show.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use lumen_admin::db::{self, Dialect};
use sqlx::AnyPool;

const USERS: i64 = 240;
const DEVICES: i64 = 180;
const CONTENTS: i64 = 40;
const VIEWS: i64 = 1_200;
const SUBSCRIPTIONS: i64 = 90;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let dialect = Dialect::from_url(&db_url);
    let pool = db::create_pool(&db_url, 5).await?;

    // Run migrations first
    db::run_migrations(&pool, dialect).await?;

    println!("=== Lumen Admin Seed Script ({dialect}) ===");

    let now = Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);

    seed_users(&pool, dialect, now).await?;
    seed_devices(&pool, dialect, now).await?;
    seed_contents(&pool, dialect, now).await?;
    seed_content_views(&pool, dialect, now).await?;
    seed_subscriptions(&pool, dialect, now).await?;
    seed_announces(&pool, dialect, now).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

/// Timestamp of the `i`-th of `n` rows spread over the last 365 days,
/// denser towards `now`.
fn spread(now: NaiveDateTime, i: i64, n: i64) -> NaiveDateTime {
    let span_minutes = 365 * 24 * 60;
    let fraction = (i as f64 / n as f64).powi(2);
    now - Duration::minutes((fraction * span_minutes as f64) as i64 + 1)
}

async fn table_count(pool: &AnyPool, table: &str) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

async fn seed_users(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "users").await?;
    if count > 0 {
        println!("[skip] Users already exist ({count})");
        return Ok(());
    }

    let sql = format!(
        "INSERT INTO users (name, created_at, updated_at) VALUES ({}, {}, {})",
        d.placeholder(1),
        d.timestamp_placeholder(2),
        d.timestamp_placeholder(3),
    );
    for i in 0..USERS {
        let created = Dialect::timestamp_value(spread(now, i, USERS));
        sqlx::query(&sql)
            .bind(format!("viewer{i:04}"))
            .bind(&created)
            .bind(&created)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {USERS} users");
    Ok(())
}

async fn seed_devices(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "devices").await?;
    if count > 0 {
        println!("[skip] Devices already exist ({count})");
        return Ok(());
    }

    let sql = format!(
        "INSERT INTO devices (device_id, username, is_vip, last_active_at, created_at, updated_at) \
         VALUES ({}, {}, {}, {}, {}, {})",
        d.placeholder(1),
        d.placeholder(2),
        d.placeholder(3),
        d.timestamp_placeholder(4),
        d.timestamp_placeholder(5),
        d.timestamp_placeholder(6),
    );
    for i in 0..DEVICES {
        let created = spread(now, i, DEVICES);
        // Every third device was seen within the last few hours.
        let last_active = if i % 3 == 0 {
            now - Duration::minutes(i % 240)
        } else {
            created + Duration::hours(1)
        };
        let username = (i % 2 == 0).then(|| format!("viewer{i:04}"));
        sqlx::query(&sql)
            .bind(format!("dev-{i:06}"))
            .bind(username)
            .bind(i % 5 == 0)
            .bind(Dialect::timestamp_value(last_active))
            .bind(Dialect::timestamp_value(created))
            .bind(Dialect::timestamp_value(created))
            .execute(pool)
            .await?;
    }

    println!("[done] Created {DEVICES} devices");
    Ok(())
}

async fn seed_contents(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "contents").await?;
    if count > 0 {
        println!("[skip] Contents already exist ({count})");
        return Ok(());
    }

    let titles = [
        "Morning News", "Champions Cup Live", "Cooking at Home", "Night Drama",
        "Kids Corner", "Weekend Movie", "Street Food Tour", "Music Countdown",
    ];
    let sql = format!(
        "INSERT INTO contents (title, is_vip, views_count, created_at, updated_at) \
         VALUES ({}, {}, {}, {}, {})",
        d.placeholder(1),
        d.placeholder(2),
        d.placeholder(3),
        d.timestamp_placeholder(4),
        d.timestamp_placeholder(5),
    );
    for i in 0..CONTENTS {
        let title = format!("{} #{}", titles[(i as usize) % titles.len()], i / 8 + 1);
        let created = Dialect::timestamp_value(spread(now, i, CONTENTS));
        sqlx::query(&sql)
            .bind(title)
            .bind(i % 4 == 0)
            .bind((CONTENTS - i) * 37)
            .bind(&created)
            .bind(&created)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {CONTENTS} contents");
    Ok(())
}

async fn seed_content_views(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "content_views").await?;
    if count > 0 {
        println!("[skip] Content views already exist ({count})");
        return Ok(());
    }

    let content_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM contents ORDER BY id")
        .fetch_all(pool)
        .await?;
    if content_ids.is_empty() {
        println!("[skip] No contents to attach views to");
        return Ok(());
    }

    let sql = format!(
        "INSERT INTO content_views (content_id, created_at) VALUES ({}, {})",
        d.placeholder(1),
        d.timestamp_placeholder(2),
    );
    for i in 0..VIEWS {
        let content_id = content_ids[(i as usize * 7) % content_ids.len()];
        sqlx::query(&sql)
            .bind(content_id)
            .bind(Dialect::timestamp_value(spread(now, i, VIEWS)))
            .execute(pool)
            .await?;
    }

    println!("[done] Created {VIEWS} content views");
    Ok(())
}

async fn seed_subscriptions(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "subscriptions").await?;
    if count > 0 {
        println!("[skip] Subscriptions already exist ({count})");
        return Ok(());
    }

    let sql = format!(
        "INSERT INTO subscriptions (is_active, created_at, updated_at) VALUES ({}, {}, {})",
        d.placeholder(1),
        d.timestamp_placeholder(2),
        d.timestamp_placeholder(3),
    );
    for i in 0..SUBSCRIPTIONS {
        let created = Dialect::timestamp_value(spread(now, i, SUBSCRIPTIONS));
        sqlx::query(&sql)
            .bind(i % 3 != 0)
            .bind(&created)
            .bind(&created)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {SUBSCRIPTIONS} subscriptions");
    Ok(())
}

async fn seed_announces(pool: &AnyPool, d: Dialect, now: NaiveDateTime) -> anyhow::Result<()> {
    let count = table_count(pool, "announces").await?;
    if count > 0 {
        println!("[skip] Announces already exist ({count})");
        return Ok(());
    }

    let announces = [
        ("Welcome to the new season", "news", Some("https://lumen.example/season"), None),
        ("Maintenance tonight 02:00-03:00", "maintenance", None, None),
        (
            "Invite a friend, get 7 VIP days",
            "promotion",
            Some("https://lumen.example/referral"),
            Some("https://cdn.lumen.example/banners/referral.png"),
        ),
    ];

    let sql = format!(
        "INSERT INTO announces (title, category, link, img_url, created_at, updated_at) \
         VALUES ({}, {}, {}, {}, {}, {})",
        d.placeholder(1),
        d.placeholder(2),
        d.placeholder(3),
        d.placeholder(4),
        d.timestamp_placeholder(5),
        d.timestamp_placeholder(6),
    );
    let created = Dialect::timestamp_value(now);
    for (title, category, link, img_url) in announces {
        sqlx::query(&sql)
            .bind(title)
            .bind(category)
            .bind(link)
            .bind(img_url)
            .bind(&created)
            .bind(&created)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} announces", announces.len());
    Ok(())
}
