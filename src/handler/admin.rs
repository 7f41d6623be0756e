use axum::{extract::State, Json};

use crate::api_models::OkResponse;
use crate::app::AppState;
use crate::db;
use crate::handler::error::AppError;

/// 清空并重建所有表
pub async fn reset_database(State(state): State<AppState>) -> Result<Json<OkResponse>, AppError> {
    let mut conn = state.db_pool.get()?;
    db::reset_schema(&mut conn).map_err(|e| {
        tracing::error!("Failed to reset database: {:#}", e);
        AppError::InternalServerError
    })?;
    Ok(Json(OkResponse::ok()))
}
