use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::stock_price;

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_price)]
#[diesel(belongs_to(crate::models::StockInfo, foreign_key = stock_info_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockPrice {
    pub id: i32,
    pub stock_info_id: i32,
    pub time: DateTime<Utc>,
    pub open: BigDecimal,
    pub high: BigDecimal,
    pub low: BigDecimal,
    pub close: BigDecimal,
    pub previous_close: Option<BigDecimal>,
    pub change: Option<BigDecimal>,
    pub change_percent: Option<BigDecimal>,
    pub adjusted_close: Option<BigDecimal>,
    pub volume: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_price)]
pub struct NewStockPrice {
    pub stock_info_id: i32,
    pub time: DateTime<Utc>,
    pub open: BigDecimal,
    pub high: BigDecimal,
    pub low: BigDecimal,
    pub close: BigDecimal,
    pub previous_close: Option<BigDecimal>,
    pub change: Option<BigDecimal>,
    pub change_percent: Option<BigDecimal>,
    pub adjusted_close: Option<BigDecimal>,
    pub volume: i64,
}
