use axum::{
    extract::{Path, State},
    Json,
};

use crate::api_models::stock_holding_detail::{
    CreateHoldingRequest, HoldingResponse, UpdateHoldingRequest,
};
use crate::api_models::OkResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::holding_service;

pub async fn create_holding(
    State(state): State<AppState>,
    Json(payload): Json<CreateHoldingRequest>,
) -> Result<Json<HoldingResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let holding = holding_service::create_holding_detail(&mut conn, &payload.into())?;
    Ok(Json(holding.into()))
}

pub async fn get_holding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HoldingResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let holding = holding_service::get_holding_detail(&mut conn, id)?;
    Ok(Json(holding.into()))
}

pub async fn list_user_holdings(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<HoldingResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;
    let holdings = holding_service::list_user_holdings(&mut conn, user_id)?;
    Ok(Json(holdings.into_iter().map(Into::into).collect()))
}

pub async fn get_user_holding_by_ticker(
    State(state): State<AppState>,
    Path((user_id, ticker)): Path<(i32, String)>,
) -> Result<Json<HoldingResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let holding = holding_service::get_user_holding_by_ticker(&mut conn, user_id, &ticker)?;
    Ok(Json(holding.into()))
}

pub async fn update_holding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateHoldingRequest>,
) -> Result<Json<HoldingResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    let holding = holding_service::update_holding_detail(&mut conn, id, payload.into())?;
    Ok(Json(holding.into()))
}

pub async fn delete_holding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    holding_service::delete_holding_detail(&mut conn, id)?;
    Ok(Json(OkResponse::ok()))
}
