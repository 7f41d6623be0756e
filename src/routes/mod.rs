use axum::Router;

use crate::app::AppState;

mod robot;
mod root;
mod stock;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .nest("/stock", stock::router())
        .nest("/robot", robot::router())
}
