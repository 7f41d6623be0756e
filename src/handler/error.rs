use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;
use serde_json::json;

use crate::services::market_data::MarketDataError;
use crate::services::ServiceError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable(String),
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "not found", "message": msg})),
            )
                .into_response(),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "bad request", "message": msg})),
            )
                .into_response(),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "service unavailable", "message": msg})),
            )
                .into_response(),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal server error"})),
            )
                .into_response(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            ServiceError::Validation(msg) => AppError::BadRequest(msg),
            ServiceError::Adapter(e) => AppError::BadRequest(e.to_string()),
            ServiceError::Database(DieselError::NotFound) => AppError::NotFound("record not found".to_string()),
            // 唯一约束、外键约束等
            ServiceError::Database(DieselError::DatabaseError(kind, info)) => {
                tracing::warn!("Rejected by database ({:?}): {}", kind, info.message());
                AppError::BadRequest(info.message().to_string())
            }
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                AppError::InternalServerError
            }
        }
    }
}

impl From<MarketDataError> for AppError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::Http(e) => {
                tracing::error!("Market data provider unreachable: {}", e);
                AppError::ServiceUnavailable(format!("market data provider unreachable: {}", e))
            }
            MarketDataError::Status { status, body } if status.is_server_error() => {
                tracing::error!("Market data provider returned {}: {}", status, body);
                AppError::ServiceUnavailable(format!("market data provider returned {}", status))
            }
            MarketDataError::Status { status, .. } => {
                AppError::BadRequest(format!("market data provider returned {}", status))
            }
            MarketDataError::Api { code, description } => {
                AppError::BadRequest(format!("{}: {}", code, description))
            }
            MarketDataError::Parse(msg) => {
                tracing::error!("Unexpected market data payload: {}", msg);
                AppError::InternalServerError
            }
        }
    }
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        tracing::error!("Failed to get DB connection: {}", err);
        AppError::InternalServerError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::price_adapter::AdapterError;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::NotFound("stock info 1".into()), StatusCode::NOT_FOUND),
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Adapter(AdapterError::MissingColumn("Close".into())),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Database(DieselError::NotFound), StatusCode::NOT_FOUND),
            (
                ServiceError::Database(DieselError::RollbackTransaction),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn provider_errors_map_to_status() {
        let api = MarketDataError::Api {
            code: "Not Found".into(),
            description: "No data found".into(),
        };
        assert_eq!(AppError::from(api).into_response().status(), StatusCode::BAD_REQUEST);

        let down = MarketDataError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(
            AppError::from(down).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
