use std::collections::HashSet;

use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::Connection;

use crate::models::{NewStockInfo, NewStockPrice, StockInfo, StockPrice, UpdateStockInfo};
use crate::repositories::{stock_info, stock_price};
use crate::services::error::{NotFoundExt, ServiceError};
use crate::services::price_adapter::PriceRecord;
use crate::utils::bigdecimal_parser::{f64_to_decimal, opt_f64_to_decimal};

/// 新建股票时使用的元数据
#[derive(Debug, Clone, PartialEq)]
pub struct StockMetadata {
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
}

impl Default for StockMetadata {
    fn default() -> Self {
        Self {
            name: None,
            market: None,
            currency: "USD".to_string(),
        }
    }
}

/// 只更新传入的字段
#[derive(Debug, Clone, Default)]
pub struct StockInfoPatch {
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StockInfoWithPrices {
    pub info: StockInfo,
    pub prices: Vec<StockPrice>,
}

/// 按 ticker 查找，不存在则创建。
///
/// 并发创建同一 ticker 时由唯一约束兜底，后到的一方会收到数据库错误。
pub fn get_or_create_stock_info(
    conn: &mut PgConnection,
    ticker: &str,
    metadata: &StockMetadata,
) -> Result<StockInfo, ServiceError> {
    if let Some(existing) = stock_info::find_by_ticker(conn, ticker)? {
        return Ok(existing);
    }

    let new_info = NewStockInfo {
        ticker: ticker.to_string(),
        name: metadata.name.clone(),
        market: metadata.market.clone(),
        currency: metadata.currency.clone(),
    };
    let created = stock_info::create(conn, &new_info)?;
    tracing::info!("Created stock info {} (id={})", created.ticker, created.id);
    Ok(created)
}

pub fn get_stock_info(conn: &mut PgConnection, info_id: i32) -> Result<StockInfoWithPrices, ServiceError> {
    let info = stock_info::find_by_id(conn, info_id).or_not_found(|| format!("stock info {}", info_id))?;
    let prices = stock_price::list_by_stock(conn, &info)?;
    Ok(StockInfoWithPrices { info, prices })
}

pub fn get_stock_info_by_ticker(
    conn: &mut PgConnection,
    ticker: &str,
) -> Result<StockInfoWithPrices, ServiceError> {
    let info = stock_info::find_by_ticker(conn, ticker)?
        .ok_or_else(|| ServiceError::NotFound(format!("stock info with ticker '{}'", ticker)))?;
    let prices = stock_price::list_by_stock(conn, &info)?;
    Ok(StockInfoWithPrices { info, prices })
}

pub fn list_stock_infos(conn: &mut PgConnection) -> Result<Vec<StockInfo>, ServiceError> {
    Ok(stock_info::list_all(conn)?)
}

pub fn update_stock_info(
    conn: &mut PgConnection,
    info_id: i32,
    patch: StockInfoPatch,
) -> Result<StockInfo, ServiceError> {
    let update_data = UpdateStockInfo {
        name: patch.name,
        market: patch.market,
        currency: patch.currency,
        updated_at: Some(Utc::now()),
    };
    stock_info::update_by_id(conn, info_id, &update_data).or_not_found(|| format!("stock info {}", info_id))
}

/// 先删价格再删股票，两步在同一个事务里，任一步失败整体回滚。
/// 返回删除的价格条数。
pub fn delete_stock_info(conn: &mut PgConnection, info_id: i32) -> Result<usize, ServiceError> {
    conn.transaction::<_, ServiceError, _>(|conn| {
        stock_info::find_by_id(conn, info_id).or_not_found(|| format!("stock info {}", info_id))?;
        let removed = stock_price::delete_by_stock(conn, info_id)?;
        stock_info::delete_by_id(conn, info_id)?;
        tracing::info!("Deleted stock info {} and {} prices", info_id, removed);
        Ok(removed)
    })
}

/// 写入一批行情，已存在的时间点跳过，返回实际写入条数。
///
/// 只查询本批数据 [min, max] 时间范围内的已有记录，避免每次都加载完整历史。
pub fn upsert_prices(
    conn: &mut PgConnection,
    ticker: &str,
    metadata: &StockMetadata,
    records: &[PriceRecord],
) -> Result<usize, ServiceError> {
    let info = get_or_create_stock_info(conn, ticker, metadata)?;

    let Some((min_time, max_time)) = time_span(records) else {
        return Ok(0);
    };

    conn.transaction::<_, ServiceError, _>(|conn| {
        let existing: HashSet<DateTime<Utc>> =
            stock_price::existing_times_in_range(conn, info.id, min_time, max_time)?
                .into_iter()
                .collect();

        let new_rows = select_new_bars(info.id, records, &existing);
        let inserted = stock_price::insert_batch(conn, &new_rows)?;
        tracing::info!(
            "Upserted prices for {}: {} received, {} already present, {} inserted",
            ticker,
            records.len(),
            existing.len(),
            inserted
        );
        Ok(inserted)
    })
}

pub fn time_span(records: &[PriceRecord]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut times = records.iter().map(PriceRecord::utc_time);
    let first = times.next()?;
    Some(times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

/// 过滤掉已存在（或本批次重复）的时间点，并丢弃缺少 OHLCV 的行
pub fn select_new_bars(
    stock_info_id: i32,
    records: &[PriceRecord],
    existing: &HashSet<DateTime<Utc>>,
) -> Vec<NewStockPrice> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for record in records {
        let time = record.utc_time();
        if existing.contains(&time) || !seen.insert(time) {
            continue;
        }
        match to_new_price(stock_info_id, record) {
            Some(row) => rows.push(row),
            None => tracing::warn!(
                "Skipping incomplete bar for {} at {}",
                record.ticker,
                record.time
            ),
        }
    }

    rows
}

fn to_new_price(stock_info_id: i32, record: &PriceRecord) -> Option<NewStockPrice> {
    Some(NewStockPrice {
        stock_info_id,
        time: record.utc_time(),
        open: f64_to_decimal(record.open?)?,
        high: f64_to_decimal(record.high?)?,
        low: f64_to_decimal(record.low?)?,
        close: f64_to_decimal(record.close?)?,
        previous_close: opt_f64_to_decimal(record.previous_close),
        change: opt_f64_to_decimal(record.change),
        change_percent: opt_f64_to_decimal(record.change_percent),
        adjusted_close: opt_f64_to_decimal(record.adjusted_close),
        volume: record.volume?,
    })
}

pub fn create_price(conn: &mut PgConnection, new_price: &NewStockPrice) -> Result<StockPrice, ServiceError> {
    Ok(stock_price::create(conn, new_price)?)
}

pub fn get_price(conn: &mut PgConnection, price_id: i32) -> Result<StockPrice, ServiceError> {
    stock_price::find_by_id(conn, price_id).or_not_found(|| format!("stock price {}", price_id))
}

pub fn list_prices(
    conn: &mut PgConnection,
    ticker: &str,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<StockPrice>, ServiceError> {
    let info = stock_info::find_by_ticker(conn, ticker)?
        .ok_or_else(|| ServiceError::NotFound(format!("stock info with ticker '{}'", ticker)))?;
    Ok(stock_price::list_by_stock_in_range(conn, info.id, start, end)?)
}

pub fn delete_price(conn: &mut PgConnection, price_id: i32) -> Result<(), ServiceError> {
    let affected = stock_price::delete_by_id(conn, price_id)?;
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("stock price {}", price_id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::TimeZone;
    use chrono_tz::Tz;
    use std::str::FromStr;

    fn bar(day: u32, close: f64) -> PriceRecord {
        PriceRecord {
            ticker: "TEST".to_string(),
            name: None,
            market: None,
            currency: "USD".to_string(),
            time: Tz::UTC.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
            open: Some(close),
            high: Some(close),
            low: Some(close),
            close: Some(close),
            volume: Some(100),
            previous_close: None,
            change: None,
            change_percent: None,
            adjusted_close: Some(close),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn span_covers_unordered_records() {
        let records = vec![bar(3, 1.0), bar(1, 1.0), bar(5, 1.0)];
        assert_eq!(time_span(&records), Some((day(1), day(5))));
        assert_eq!(time_span(&[]), None);
    }

    #[test]
    fn all_new_bars_are_selected() {
        let records = vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)];
        let rows = select_new_bars(7, &records, &HashSet::new());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].stock_info_id, 7);
        assert_eq!(rows[0].time, day(1));
        assert_eq!(rows[2].close, BigDecimal::from_str("12").unwrap());
        assert_eq!(rows[1].previous_close, None);
    }

    #[test]
    fn existing_times_are_skipped() {
        let records = vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)];
        let existing: HashSet<_> = [day(1), day(2), day(3)].into_iter().collect();
        assert!(select_new_bars(7, &records, &existing).is_empty());

        let partial: HashSet<_> = [day(2)].into_iter().collect();
        let rows = select_new_bars(7, &records, &partial);
        let times: Vec<_> = rows.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![day(1), day(3)]);
    }

    #[test]
    fn duplicate_times_within_batch_insert_once() {
        let records = vec![bar(1, 10.0), bar(1, 99.0)];
        let rows = select_new_bars(1, &records, &HashSet::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].close, BigDecimal::from(10));
    }

    #[test]
    fn incomplete_bars_are_dropped() {
        let mut missing_close = bar(1, 10.0);
        missing_close.close = None;
        let mut missing_volume = bar(2, 10.0);
        missing_volume.volume = None;

        let rows = select_new_bars(1, &[missing_close, missing_volume, bar(3, 1.0)], &HashSet::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, day(3));
    }
}
