use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::StockTransaction;
use crate::services::holding_service::TransactionType;
use crate::services::transaction_service::{TransactionInput, TransactionPatch};

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub user_id: i32,
    pub stock_info_id: i32,
    pub ticker: String,
    pub transaction_date: Option<DateTime<Utc>>,
    pub brokerage: String,
    pub transaction_type: TransactionType,
    pub transaction_price: BigDecimal,
    pub quantity: i32,
    pub total_amount: BigDecimal,
}

impl From<CreateTransactionRequest> for TransactionInput {
    fn from(req: CreateTransactionRequest) -> Self {
        Self {
            user_id: req.user_id,
            stock_info_id: req.stock_info_id,
            ticker: req.ticker,
            transaction_date: req.transaction_date,
            brokerage: req.brokerage,
            transaction_type: req.transaction_type,
            transaction_price: req.transaction_price,
            quantity: req.quantity,
            total_amount: req.total_amount,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    pub brokerage: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub transaction_price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub total_amount: Option<BigDecimal>,
}

impl From<UpdateTransactionRequest> for TransactionPatch {
    fn from(req: UpdateTransactionRequest) -> Self {
        Self {
            brokerage: req.brokerage,
            transaction_type: req.transaction_type,
            transaction_price: req.transaction_price,
            quantity: req.quantity,
            total_amount: req.total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
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

impl From<StockTransaction> for TransactionResponse {
    fn from(tx: StockTransaction) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            stock_info_id: tx.stock_info_id,
            ticker: tx.ticker,
            transaction_date: tx.transaction_date,
            brokerage: tx.brokerage,
            transaction_type: tx.transaction_type,
            transaction_price: tx.transaction_price,
            quantity: tx.quantity,
            total_amount: tx.total_amount,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}
