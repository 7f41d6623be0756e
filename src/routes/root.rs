use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::app::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
}

async fn root() -> Json<Value> {
    Json(json!({"message": "Welcome to the Stock Playground API!"}))
}

async fn healthz() -> &'static str {
    "ok"
}
