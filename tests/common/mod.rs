use std::sync::OnceLock;

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::Connection;
use stock_playground::db::{self, DbPool};
use stock_playground::services::price_adapter::PriceRecord;

// 数据库测试都标记为 ignore，设置 TEST_DATABASE_URL 后用 `cargo test -- --ignored` 运行

static MIGRATED: OnceLock<()> = OnceLock::new();

fn database_url() -> String {
    let url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run database tests");
    MIGRATED.get_or_init(|| {
        let mut conn = PgConnection::establish(&url).expect("connect to test database");
        db::run_migrations(&mut conn).expect("run migrations");
    });
    url
}

/// 打开一个处于测试事务中的连接，测试结束后数据全部回滚
#[allow(dead_code)]
pub fn test_connection() -> PgConnection {
    let mut conn = PgConnection::establish(&database_url()).expect("connect to test database");
    conn.begin_test_transaction().expect("begin test transaction");
    conn
}

#[derive(Debug)]
struct TestTransaction;

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for TestTransaction {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.begin_test_transaction()
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// 只有一个连接的连接池，连接处于测试事务中，供整条 HTTP 链路测试使用
#[allow(dead_code)]
pub fn test_pool() -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url());
    Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestTransaction))
        .build(manager)
        .expect("build test pool")
}

#[allow(dead_code)]
pub fn daily_bar(ticker: &str, day: u32, close: f64) -> PriceRecord {
    bar_at(ticker, Tz::UTC.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(), close)
}

/// 从 2000-01-01 起连续 `days` 天的日线，衍生字段全部填充
#[allow(dead_code)]
pub fn long_history(ticker: &str, days: usize) -> Vec<PriceRecord> {
    let first = Tz::UTC.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let mut previous: Option<f64> = None;
    (0..days)
        .map(|i| {
            let close = 100.0 + (i % 50) as f64;
            let mut bar = bar_at(ticker, first + Duration::days(i as i64), close);
            if let Some(prev) = previous {
                bar.previous_close = Some(prev);
                bar.change = Some(close - prev);
                bar.change_percent = Some((close - prev) / prev * 100.0);
            }
            previous = Some(close);
            bar
        })
        .collect()
}

#[allow(dead_code)]
fn bar_at(ticker: &str, time: DateTime<Tz>, close: f64) -> PriceRecord {
    PriceRecord {
        ticker: ticker.to_string(),
        name: None,
        market: None,
        currency: "USD".to_string(),
        time,
        open: Some(close),
        high: Some(close + 1.0),
        low: Some(close - 1.0),
        close: Some(close),
        volume: Some(1_000),
        previous_close: None,
        change: None,
        change_percent: None,
        adjusted_close: Some(close),
    }
}

#[allow(dead_code)]
pub fn utc_day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
}
