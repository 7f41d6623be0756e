use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{NewStockHoldingDetail, StockHoldingDetail, UpdateStockHoldingDetail};

#[derive(Debug, Deserialize)]
pub struct CreateHoldingRequest {
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

impl From<CreateHoldingRequest> for NewStockHoldingDetail {
    fn from(req: CreateHoldingRequest) -> Self {
        Self {
            user_id: req.user_id,
            stock_info_id: req.stock_info_id,
            ticker: req.ticker,
            holding_quantity: req.holding_quantity,
            average_buy_price: req.average_buy_price,
            total_buy_amount: req.total_buy_amount,
            current_price: req.current_price,
            total_evaluation_amount: req.total_evaluation_amount,
            total_profit: req.total_profit,
            krw_profit: req.krw_profit,
            daily_profit: req.daily_profit,
            current_exchange_rate: req.current_exchange_rate,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHoldingRequest {
    pub holding_quantity: Option<i32>,
    pub average_buy_price: Option<BigDecimal>,
    pub total_buy_amount: Option<BigDecimal>,
    pub current_price: Option<BigDecimal>,
    pub total_evaluation_amount: Option<BigDecimal>,
    pub total_profit: Option<BigDecimal>,
    pub krw_profit: Option<BigDecimal>,
    pub daily_profit: Option<BigDecimal>,
    pub current_exchange_rate: Option<BigDecimal>,
}

impl From<UpdateHoldingRequest> for UpdateStockHoldingDetail {
    fn from(req: UpdateHoldingRequest) -> Self {
        Self {
            holding_quantity: req.holding_quantity,
            average_buy_price: req.average_buy_price,
            total_buy_amount: req.total_buy_amount,
            current_price: req.current_price,
            total_evaluation_amount: req.total_evaluation_amount,
            total_profit: req.total_profit,
            krw_profit: req.krw_profit,
            daily_profit: req.daily_profit,
            current_exchange_rate: req.current_exchange_rate,
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HoldingResponse {
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

impl From<StockHoldingDetail> for HoldingResponse {
    fn from(h: StockHoldingDetail) -> Self {
        Self {
            id: h.id,
            user_id: h.user_id,
            stock_info_id: h.stock_info_id,
            ticker: h.ticker,
            holding_quantity: h.holding_quantity,
            average_buy_price: h.average_buy_price,
            total_buy_amount: h.total_buy_amount,
            current_price: h.current_price,
            total_evaluation_amount: h.total_evaluation_amount,
            total_profit: h.total_profit,
            krw_profit: h.krw_profit,
            daily_profit: h.daily_profit,
            current_exchange_rate: h.current_exchange_rate,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}
