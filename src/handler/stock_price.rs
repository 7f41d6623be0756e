use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api_models::stock_price::{CreateStockPriceRequest, PriceRangeQuery, StockPriceResponse};
use crate::api_models::OkResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::stock_service;

pub async fn create_price(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockPriceRequest>,
) -> Result<Json<StockPriceResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let price = stock_service::create_price(&mut conn, &payload.into())?;
    Ok(Json(price.into()))
}

pub async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockPriceResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let price = stock_service::get_price(&mut conn, id)?;
    Ok(Json(price.into()))
}

pub async fn list_prices_by_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(range): Query<PriceRangeQuery>,
) -> Result<Json<Vec<StockPriceResponse>>, AppError> {
    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start > end {
            return Err(AppError::BadRequest("start must not be after end".to_string()));
        }
    }
    let mut conn = state.db_pool.get()?;
    let prices = stock_service::list_prices(&mut conn, &ticker, range.start, range.end)?;
    Ok(Json(prices.into_iter().map(Into::into).collect()))
}

pub async fn delete_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    stock_service::delete_price(&mut conn, id)?;
    Ok(Json(OkResponse::ok()))
}
