use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::models::{NewStockTransaction, StockTransaction, UpdateStockTransaction};
use crate::schema::stock_transaction::dsl::*;

pub fn create(
    conn: &mut PgConnection,
    new_tx: &NewStockTransaction,
) -> Result<StockTransaction, diesel::result::Error> {
    diesel::insert_into(stock_transaction)
        .values(new_tx)
        .get_result(conn)
}

pub fn find_by_id(conn: &mut PgConnection, tx_id: i32) -> Result<StockTransaction, diesel::result::Error> {
    stock_transaction.find(tx_id).first(conn)
}

pub fn list_by_user(conn: &mut PgConnection, uid: i32) -> Result<Vec<StockTransaction>, diesel::result::Error> {
    stock_transaction
        .filter(user_id.eq(uid))
        .order((transaction_date.asc(), id.asc()))
        .load(conn)
}

pub fn list_by_user_and_stock(
    conn: &mut PgConnection,
    uid: i32,
    info_id: i32,
) -> Result<Vec<StockTransaction>, diesel::result::Error> {
    stock_transaction
        .filter(user_id.eq(uid))
        .filter(stock_info_id.eq(info_id))
        .load(conn)
}

pub fn update_by_id(
    conn: &mut PgConnection,
    tx_id: i32,
    update_data: &UpdateStockTransaction,
) -> Result<StockTransaction, diesel::result::Error> {
    diesel::update(stock_transaction.find(tx_id))
        .set(update_data)
        .get_result(conn)
}

pub fn delete_by_id(conn: &mut PgConnection, tx_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(stock_transaction.find(tx_id)).execute(conn)
}
