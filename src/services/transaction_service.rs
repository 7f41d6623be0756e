use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;

use crate::models::{NewStockTransaction, StockTransaction, UpdateStockTransaction};
use crate::repositories::{stock_info, stock_transaction};
use crate::services::error::{NotFoundExt, ServiceError};
use crate::services::holding_service::{recompute_holding, TransactionType};

pub const MAX_BROKERAGE_LEN: usize = 50;

/// 新增一笔交易所需的字段
#[derive(Debug, Clone)]
pub struct TransactionInput {
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

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub brokerage: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub transaction_price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub total_amount: Option<BigDecimal>,
}

fn validate_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::Validation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    Ok(())
}

fn validate_brokerage(brokerage: &str) -> Result<(), ServiceError> {
    let len = brokerage.chars().count();
    if len == 0 || len > MAX_BROKERAGE_LEN {
        return Err(ServiceError::Validation(format!(
            "brokerage must be 1 to {} characters",
            MAX_BROKERAGE_LEN
        )));
    }
    Ok(())
}

fn validate_amount(field: &str, value: &BigDecimal) -> Result<(), ServiceError> {
    if *value < BigDecimal::zero() {
        return Err(ServiceError::Validation(format!("{} must not be negative", field)));
    }
    Ok(())
}

impl TransactionInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_quantity(self.quantity)?;
        validate_brokerage(&self.brokerage)?;
        validate_amount("transaction_price", &self.transaction_price)?;
        validate_amount("total_amount", &self.total_amount)
    }
}

impl TransactionPatch {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(brokerage) = &self.brokerage {
            validate_brokerage(brokerage)?;
        }
        if let Some(price) = &self.transaction_price {
            validate_amount("transaction_price", price)?;
        }
        if let Some(total) = &self.total_amount {
            validate_amount("total_amount", total)?;
        }
        Ok(())
    }

    fn into_changeset(self) -> UpdateStockTransaction {
        UpdateStockTransaction {
            brokerage: self.brokerage,
            transaction_type: self.transaction_type.map(|t| t.as_str().to_string()),
            transaction_price: self.transaction_price,
            quantity: self.quantity,
            total_amount: self.total_amount,
            updated_at: Some(Utc::now()),
        }
    }
}

/// 写入交易后同步重算持仓。交易先提交，重算失败时返回错误但交易不回滚。
/// ticker 必须与 stock_info_id 对应的股票一致，持仓里记录的是股票表中的 ticker。
pub fn create_transaction(
    conn: &mut PgConnection,
    input: TransactionInput,
) -> Result<StockTransaction, ServiceError> {
    input.validate()?;
    let info = stock_info::find_by_id(conn, input.stock_info_id)
        .or_not_found(|| format!("stock info {}", input.stock_info_id))?;
    if !input.ticker.trim().eq_ignore_ascii_case(&info.ticker) {
        return Err(ServiceError::Validation(format!(
            "ticker '{}' does not match stock info {} ('{}')",
            input.ticker, info.id, info.ticker
        )));
    }

    let new_tx = NewStockTransaction {
        user_id: input.user_id,
        stock_info_id: info.id,
        ticker: info.ticker,
        transaction_date: input.transaction_date.unwrap_or_else(Utc::now),
        brokerage: input.brokerage,
        transaction_type: input.transaction_type.as_str().to_string(),
        transaction_price: input.transaction_price,
        quantity: input.quantity,
        total_amount: input.total_amount,
    };
    let created = stock_transaction::create(conn, &new_tx)?;
    tracing::info!(
        "Recorded {} of {} x{} for user {}",
        created.transaction_type,
        created.ticker,
        created.quantity,
        created.user_id
    );

    recompute_holding(conn, created.user_id, created.stock_info_id, &created.ticker)?;
    Ok(created)
}

pub fn get_transaction(conn: &mut PgConnection, tx_id: i32) -> Result<StockTransaction, ServiceError> {
    stock_transaction::find_by_id(conn, tx_id).or_not_found(|| format!("transaction {}", tx_id))
}

pub fn list_user_transactions(conn: &mut PgConnection, user_id: i32) -> Result<Vec<StockTransaction>, ServiceError> {
    Ok(stock_transaction::list_by_user(conn, user_id)?)
}

pub fn update_transaction(
    conn: &mut PgConnection,
    tx_id: i32,
    patch: TransactionPatch,
) -> Result<StockTransaction, ServiceError> {
    patch.validate()?;
    let updated = stock_transaction::update_by_id(conn, tx_id, &patch.into_changeset())
        .or_not_found(|| format!("transaction {}", tx_id))?;

    recompute_holding(conn, updated.user_id, updated.stock_info_id, &updated.ticker)?;
    Ok(updated)
}

pub fn delete_transaction(conn: &mut PgConnection, tx_id: i32) -> Result<(), ServiceError> {
    let existing = get_transaction(conn, tx_id)?;
    stock_transaction::delete_by_id(conn, tx_id)?;
    tracing::info!("Deleted transaction {} for user {}", tx_id, existing.user_id);

    recompute_holding(conn, existing.user_id, existing.stock_info_id, &existing.ticker)?;
    Ok(())
}
