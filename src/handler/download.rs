use axum::{extract::State, Json};

use crate::api_models::download::{DownloadRequest, DownloadResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::market_data;
use crate::services::price_adapter::{frame_to_price_records, parse_timezone};
use crate::services::stock_service;
use crate::services::ServiceError;

/// 从行情提供方下载日线并写入数据库，返回新写入的条数
pub async fn download_prices(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, AppError> {
    if req.ticker.trim().is_empty() {
        return Err(AppError::BadRequest("ticker must not be empty".to_string()));
    }
    if req.end <= req.start {
        return Err(AppError::BadRequest("end must be after start".to_string()));
    }
    // 先校验时区，避免下载完才失败
    parse_timezone(&req.timezone).map_err(ServiceError::from)?;

    let frame = market_data::fetch_price_frame(
        &state.http_client,
        &state.config.market_data_url,
        &req.ticker,
        req.start,
        req.end,
        req.auto_adjust,
    )
    .await?;
    let records = frame_to_price_records(&frame, &req.adapter_options()).map_err(ServiceError::from)?;
    // 区间内没有交易日时不写库，也不创建股票信息
    if records.is_empty() {
        tracing::info!("No bars for {} between {} and {}", req.ticker, req.start, req.end);
        return Ok(Json(DownloadResponse { saved: 0 }));
    }

    let mut conn = state.db_pool.get()?;
    let saved = stock_service::upsert_prices(&mut conn, &req.ticker, &req.metadata(), &records)?;
    tracing::info!("Download for {} saved {} of {} bars", req.ticker, saved, records.len());
    Ok(Json(DownloadResponse { saved }))
}
