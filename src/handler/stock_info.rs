use axum::{
    extract::{Path, State},
    Json,
};

use crate::api_models::stock_info::{
    CreateStockInfoRequest, StockInfoResponse, StockInfoWithPricesResponse, UpdateStockInfoRequest,
};
use crate::api_models::OkResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::stock_service;

/// 按 ticker 获取股票信息，不存在则创建
pub async fn create_stock_info(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockInfoRequest>,
) -> Result<Json<StockInfoResponse>, AppError> {
    if payload.ticker.trim().is_empty() {
        return Err(AppError::BadRequest("ticker must not be empty".to_string()));
    }
    let mut conn = state.db_pool.get()?;
    let info = stock_service::get_or_create_stock_info(&mut conn, &payload.ticker, &payload.metadata())?;
    Ok(Json(info.into()))
}

pub async fn list_stock_infos(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockInfoResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;
    let infos = stock_service::list_stock_infos(&mut conn)?;
    Ok(Json(infos.into_iter().map(Into::into).collect()))
}

pub async fn get_stock_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockInfoWithPricesResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let info = stock_service::get_stock_info(&mut conn, id)?;
    Ok(Json(info.into()))
}

pub async fn get_stock_info_by_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockInfoWithPricesResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let info = stock_service::get_stock_info_by_ticker(&mut conn, &ticker)?;
    Ok(Json(info.into()))
}

pub async fn update_stock_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockInfoRequest>,
) -> Result<Json<StockInfoResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let info = stock_service::update_stock_info(&mut conn, id, payload.into())?;
    Ok(Json(info.into()))
}

/// 删除股票信息及其全部价格
pub async fn delete_stock_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    stock_service::delete_stock_info(&mut conn, id)?;
    Ok(Json(OkResponse::ok()))
}
