use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::models::{NewStockPrice, StockInfo, StockPrice};
use crate::schema::stock_price::dsl::*;

pub fn create(conn: &mut PgConnection, new_price: &NewStockPrice) -> Result<StockPrice, diesel::result::Error> {
    diesel::insert_into(stock_price)
        .values(new_price)
        .get_result(conn)
}

/// 每条 INSERT 最多写入的行数。每行 11 个绑定参数，Postgres 单条语句上限 65535 个
pub const INSERT_CHUNK_SIZE: usize = 1000;

/// 分批插入，返回写入行数
pub fn insert_batch(conn: &mut PgConnection, rows: &[NewStockPrice]) -> Result<usize, diesel::result::Error> {
    let mut inserted = 0;
    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        inserted += diesel::insert_into(stock_price).values(chunk).execute(conn)?;
    }
    Ok(inserted)
}

pub fn find_by_id(conn: &mut PgConnection, price_id: i32) -> Result<StockPrice, diesel::result::Error> {
    stock_price.find(price_id).first(conn)
}

pub fn list_by_stock(conn: &mut PgConnection, info: &StockInfo) -> Result<Vec<StockPrice>, diesel::result::Error> {
    StockPrice::belonging_to(info)
        .order(time.asc())
        .load(conn)
}

pub fn list_by_stock_in_range(
    conn: &mut PgConnection,
    info_id: i32,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<StockPrice>, diesel::result::Error> {
    let mut query = stock_price.filter(stock_info_id.eq(info_id)).into_boxed();

    if let Some(start) = start {
        query = query.filter(time.ge(start));
    }
    if let Some(end) = end {
        query = query.filter(time.le(end));
    }

    query.order(time.asc()).load(conn)
}

/// 只查询 [min_time, max_time] 区间内已存在的时间点
pub fn existing_times_in_range(
    conn: &mut PgConnection,
    info_id: i32,
    min_time: DateTime<Utc>,
    max_time: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, diesel::result::Error> {
    stock_price
        .filter(stock_info_id.eq(info_id))
        .filter(time.ge(min_time))
        .filter(time.le(max_time))
        .select(time)
        .load(conn)
}

pub fn count_by_stock(conn: &mut PgConnection, info_id: i32) -> Result<i64, diesel::result::Error> {
    stock_price
        .filter(stock_info_id.eq(info_id))
        .count()
        .get_result(conn)
}

pub fn delete_by_stock(conn: &mut PgConnection, info_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(stock_price.filter(stock_info_id.eq(info_id))).execute(conn)
}

pub fn delete_by_id(conn: &mut PgConnection, price_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(stock_price.find(price_id)).execute(conn)
}
