use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::OptionalExtension;

use crate::models::{NewStockHoldingDetail, StockHoldingDetail, UpdateStockHoldingDetail};
use crate::schema::stock_holding_detail::dsl::*;

pub fn create(
    conn: &mut PgConnection,
    new_holding: &NewStockHoldingDetail,
) -> Result<StockHoldingDetail, diesel::result::Error> {
    diesel::insert_into(stock_holding_detail)
        .values(new_holding)
        .get_result(conn)
}

pub fn find_by_id(conn: &mut PgConnection, holding_id: i32) -> Result<StockHoldingDetail, diesel::result::Error> {
    stock_holding_detail.find(holding_id).first(conn)
}

pub fn find_by_user_and_stock(
    conn: &mut PgConnection,
    uid: i32,
    info_id: i32,
) -> Result<Option<StockHoldingDetail>, diesel::result::Error> {
    stock_holding_detail
        .filter(user_id.eq(uid))
        .filter(stock_info_id.eq(info_id))
        .first::<StockHoldingDetail>(conn)
        .optional()
}

pub fn find_by_user_and_ticker(
    conn: &mut PgConnection,
    uid: i32,
    symbol: &str,
) -> Result<Option<StockHoldingDetail>, diesel::result::Error> {
    stock_holding_detail
        .filter(user_id.eq(uid))
        .filter(ticker.eq(symbol))
        .first::<StockHoldingDetail>(conn)
        .optional()
}

pub fn list_by_user(conn: &mut PgConnection, uid: i32) -> Result<Vec<StockHoldingDetail>, diesel::result::Error> {
    stock_holding_detail
        .filter(user_id.eq(uid))
        .order(ticker.asc())
        .load(conn)
}

pub fn update_by_id(
    conn: &mut PgConnection,
    holding_id: i32,
    update_data: &UpdateStockHoldingDetail,
) -> Result<StockHoldingDetail, diesel::result::Error> {
    diesel::update(stock_holding_detail.find(holding_id))
        .set(update_data)
        .get_result(conn)
}

pub fn delete_by_id(conn: &mut PgConnection, holding_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(stock_holding_detail.find(holding_id)).execute(conn)
}
