use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::stock_holding_detail;

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_holding_detail)]
#[diesel(belongs_to(crate::models::StockInfo, foreign_key = stock_info_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockHoldingDetail {
    pub id: i32,
    pub user_id: i32,
    pub stock_info_id: i32,
    pub ticker: String,
    pub holding_quantity: i32,
    pub average_buy_price: BigDecimal,
    pub total_buy_amount: BigDecimal,
    pub current_price: Option<BigDecimal>,
    pub total_evaluation_amount: Option<BigDecimal>,
    pub total_profit: Option<BigDecimal>,
    pub krw_profit: Option<BigDecimal>,
    pub daily_profit: Option<BigDecimal>,
    pub current_exchange_rate: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Default)]
#[diesel(table_name = stock_holding_detail)]
pub struct NewStockHoldingDetail {
    pub user_id: i32,
    pub stock_info_id: i32,
    pub ticker: String,
    pub holding_quantity: i32,
    pub average_buy_price: BigDecimal,
    pub total_buy_amount: BigDecimal,
    pub current_price: Option<BigDecimal>,
    pub total_evaluation_amount: Option<BigDecimal>,
    pub total_profit: Option<BigDecimal>,
    pub krw_profit: Option<BigDecimal>,
    pub daily_profit: Option<BigDecimal>,
    pub current_exchange_rate: Option<BigDecimal>,
}

/// 为 None 的字段不更新
#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = stock_holding_detail)]
pub struct UpdateStockHoldingDetail {
    pub holding_quantity: Option<i32>,
    pub average_buy_price: Option<BigDecimal>,
    pub total_buy_amount: Option<BigDecimal>,
    pub current_price: Option<BigDecimal>,
    pub total_evaluation_amount: Option<BigDecimal>,
    pub total_profit: Option<BigDecimal>,
    pub krw_profit: Option<BigDecimal>,
    pub daily_profit: Option<BigDecimal>,
    pub current_exchange_rate: Option<BigDecimal>,
    pub updated_at: Option<DateTime<Utc>>,
}
