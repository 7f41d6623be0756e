use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::stock_info;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_info)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockInfo {
    pub id: i32,
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stock_info)]
pub struct NewStockInfo {
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = stock_info)]
pub struct UpdateStockInfo {
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
