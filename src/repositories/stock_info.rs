use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::OptionalExtension;

use crate::models::{NewStockInfo, StockInfo, UpdateStockInfo};
use crate::schema::stock_info::dsl::*;

pub fn create(conn: &mut PgConnection, new_info: &NewStockInfo) -> Result<StockInfo, diesel::result::Error> {
    diesel::insert_into(stock_info)
        .values(new_info)
        .get_result(conn)
}

pub fn find_by_id(conn: &mut PgConnection, info_id: i32) -> Result<StockInfo, diesel::result::Error> {
    stock_info.find(info_id).first(conn)
}

pub fn find_by_ticker(
    conn: &mut PgConnection,
    symbol: &str,
) -> Result<Option<StockInfo>, diesel::result::Error> {
    stock_info
        .filter(ticker.eq(symbol))
        .first::<StockInfo>(conn)
        .optional()
}

pub fn list_all(conn: &mut PgConnection) -> Result<Vec<StockInfo>, diesel::result::Error> {
    stock_info.order(id.asc()).load(conn)
}

pub fn update_by_id(
    conn: &mut PgConnection,
    info_id: i32,
    update_data: &UpdateStockInfo,
) -> Result<StockInfo, diesel::result::Error> {
    diesel::update(stock_info.find(info_id))
        .set(update_data)
        .get_result(conn)
}

pub fn delete_by_id(conn: &mut PgConnection, info_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(stock_info.find(info_id)).execute(conn)
}
