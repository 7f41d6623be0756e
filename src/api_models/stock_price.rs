use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{NewStockPrice, StockPrice};

#[derive(Debug, Deserialize)]
pub struct CreateStockPriceRequest {
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

impl From<CreateStockPriceRequest> for NewStockPrice {
    fn from(req: CreateStockPriceRequest) -> Self {
        Self {
            stock_info_id: req.stock_info_id,
            time: req.time,
            open: req.open,
            high: req.high,
            low: req.low,
            close: req.close,
            previous_close: req.previous_close,
            change: req.change,
            change_percent: req.change_percent,
            adjusted_close: req.adjusted_close,
            volume: req.volume,
        }
    }
}

/// 按时间区间查询价格，两端都可省略
#[derive(Debug, Default, Deserialize)]
pub struct PriceRangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct StockPriceResponse {
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

impl From<StockPrice> for StockPriceResponse {
    fn from(p: StockPrice) -> Self {
        Self {
            id: p.id,
            stock_info_id: p.stock_info_id,
            time: p.time,
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
            previous_close: p.previous_close,
            change: p.change,
            change_percent: p.change_percent,
            adjusted_close: p.adjusted_close,
            volume: p.volume,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
