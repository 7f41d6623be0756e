use axum::{
    extract::{Path, State},
    Json,
};

use crate::api_models::stock_transaction::{
    CreateTransactionRequest, TransactionResponse, UpdateTransactionRequest,
};
use crate::api_models::OkResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::transaction_service;

/// 记录一笔交易并重算持仓
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let tx = transaction_service::create_transaction(&mut conn, payload.into())?;
    Ok(Json(tx.into()))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TransactionResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let tx = transaction_service::get_transaction(&mut conn, id)?;
    Ok(Json(tx.into()))
}

pub async fn list_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;
    let txs = transaction_service::list_user_transactions(&mut conn, user_id)?;
    Ok(Json(txs.into_iter().map(Into::into).collect()))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let tx = transaction_service::update_transaction(&mut conn, id, payload.into())?;
    Ok(Json(tx.into()))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    transaction_service::delete_transaction(&mut conn, id)?;
    Ok(Json(OkResponse::ok()))
}
