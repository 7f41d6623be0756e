use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::stock_transaction;

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_transaction)]
#[diesel(belongs_to(crate::models::StockInfo, foreign_key = stock_info_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockTransaction {
    pub id: i32,
    pub user_id: i32,
    pub stock_info_id: i32,
    pub ticker: String,
    pub transaction_date: DateTime<Utc>,
    pub brokerage: String,
    pub transaction_type: String,
    pub transaction_price: BigDecimal,
    pub quantity: i32,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stock_transaction)]
pub struct NewStockTransaction {
    pub user_id: i32,
    pub stock_info_id: i32,
    pub ticker: String,
    pub transaction_date: DateTime<Utc>,
    pub brokerage: String,
    pub transaction_type: String,
    pub transaction_price: BigDecimal,
    pub quantity: i32,
    pub total_amount: BigDecimal,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = stock_transaction)]
pub struct UpdateStockTransaction {
    pub brokerage: Option<String>,
    pub transaction_type: Option<String>,
    pub transaction_price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub total_amount: Option<BigDecimal>,
    pub updated_at: Option<DateTime<Utc>>,
}
