use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::Connection;
use serde::{Deserialize, Serialize};

use crate::models::{NewStockHoldingDetail, StockHoldingDetail, StockTransaction, UpdateStockHoldingDetail};
use crate::repositories::{stock_holding_detail, stock_transaction};
use crate::services::error::{NotFoundExt, ServiceError};

/// 平均买入价保留的小数位
pub const AVERAGE_PRICE_SCALE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            other => Err(ServiceError::Validation(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 由交易流水汇总出的持仓
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingSummary {
    pub holding_quantity: i64,
    pub total_buy_amount: BigDecimal,
    pub average_buy_price: BigDecimal,
}

impl HoldingSummary {
    pub fn is_open(&self) -> bool {
        self.holding_quantity > 0
    }
}

/// 买入累加数量和金额，卖出扣减；与顺序无关。
pub fn summarize_transactions(transactions: &[StockTransaction]) -> HoldingSummary {
    let mut quantity: i64 = 0;
    let mut total = BigDecimal::zero();

    for tx in transactions {
        match tx.transaction_type.parse::<TransactionType>() {
            Ok(TransactionType::Buy) => {
                quantity += i64::from(tx.quantity);
                total += &tx.total_amount;
            }
            Ok(TransactionType::Sell) => {
                quantity -= i64::from(tx.quantity);
                total -= &tx.total_amount;
            }
            Err(_) => {
                tracing::warn!(
                    "Ignoring transaction {} with unknown type '{}'",
                    tx.id,
                    tx.transaction_type
                );
            }
        }
    }

    let average = if quantity > 0 {
        (&total / &BigDecimal::from(quantity)).round(AVERAGE_PRICE_SCALE)
    } else {
        BigDecimal::zero()
    };

    HoldingSummary {
        holding_quantity: quantity,
        total_buy_amount: total,
        average_buy_price: average,
    }
}

/// 根据全部交易流水重新计算某用户某股票的持仓。
///
/// 数量 <= 0 时删除持仓并返回 `None`；否则原地更新或新建。
pub fn recompute_holding(
    conn: &mut PgConnection,
    user_id: i32,
    stock_info_id: i32,
    ticker: &str,
) -> Result<Option<StockHoldingDetail>, ServiceError> {
    conn.transaction::<_, ServiceError, _>(|conn| {
        let transactions = stock_transaction::list_by_user_and_stock(conn, user_id, stock_info_id)?;
        let summary = summarize_transactions(&transactions);
        let existing = stock_holding_detail::find_by_user_and_stock(conn, user_id, stock_info_id)?;

        if !summary.is_open() {
            if let Some(holding) = existing {
                stock_holding_detail::delete_by_id(conn, holding.id)?;
                tracing::info!("Closed holding for user {} on {}", user_id, ticker);
            }
            return Ok(None);
        }

        let quantity = i32::try_from(summary.holding_quantity).map_err(|_| {
            ServiceError::Validation(format!(
                "holding quantity {} out of range",
                summary.holding_quantity
            ))
        })?;

        let holding = match existing {
            Some(holding) => {
                let update_data = UpdateStockHoldingDetail {
                    holding_quantity: Some(quantity),
                    average_buy_price: Some(summary.average_buy_price),
                    total_buy_amount: Some(summary.total_buy_amount),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                };
                stock_holding_detail::update_by_id(conn, holding.id, &update_data)?
            }
            None => {
                let new_holding = NewStockHoldingDetail {
                    user_id,
                    stock_info_id,
                    ticker: ticker.to_string(),
                    holding_quantity: quantity,
                    average_buy_price: summary.average_buy_price,
                    total_buy_amount: summary.total_buy_amount,
                    ..Default::default()
                };
                stock_holding_detail::create(conn, &new_holding)?
            }
        };

        tracing::debug!(
            "Recomputed holding for user {} on {}: qty={} avg={}",
            user_id,
            ticker,
            holding.holding_quantity,
            holding.average_buy_price
        );
        Ok(Some(holding))
    })
}

pub fn create_holding_detail(
    conn: &mut PgConnection,
    new_holding: &NewStockHoldingDetail,
) -> Result<StockHoldingDetail, ServiceError> {
    Ok(stock_holding_detail::create(conn, new_holding)?)
}

pub fn get_holding_detail(conn: &mut PgConnection, holding_id: i32) -> Result<StockHoldingDetail, ServiceError> {
    stock_holding_detail::find_by_id(conn, holding_id).or_not_found(|| format!("holding detail {}", holding_id))
}

pub fn list_user_holdings(conn: &mut PgConnection, user_id: i32) -> Result<Vec<StockHoldingDetail>, ServiceError> {
    Ok(stock_holding_detail::list_by_user(conn, user_id)?)
}

pub fn get_user_holding_by_ticker(
    conn: &mut PgConnection,
    user_id: i32,
    ticker: &str,
) -> Result<StockHoldingDetail, ServiceError> {
    stock_holding_detail::find_by_user_and_ticker(conn, user_id, ticker)?.ok_or_else(|| {
        ServiceError::NotFound(format!("holding of '{}' for user {}", ticker, user_id))
    })
}

pub fn update_holding_detail(
    conn: &mut PgConnection,
    holding_id: i32,
    mut update_data: UpdateStockHoldingDetail,
) -> Result<StockHoldingDetail, ServiceError> {
    update_data.updated_at = Some(Utc::now());
    stock_holding_detail::update_by_id(conn, holding_id, &update_data)
        .or_not_found(|| format!("holding detail {}", holding_id))
}

pub fn delete_holding_detail(conn: &mut PgConnection, holding_id: i32) -> Result<(), ServiceError> {
    if stock_holding_detail::delete_by_id(conn, holding_id)? == 0 {
        return Err(ServiceError::NotFound(format!("holding detail {}", holding_id)));
    }
    Ok(())
}
