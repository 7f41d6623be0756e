use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use crate::app::AppState;
use crate::handler::{
    admin, download, stock_holding_detail as holding, stock_info as info, stock_price as price,
    stock_transaction as transaction,
};

/// 集合路径同时注册带 / 和不带 / 两种写法
fn collection(router: Router<AppState>, path: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, methods.clone())
        .route(&format!("{}/", path), methods)
}

pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/download", post(download::download_prices))
        .route("/reset", post(admin::reset_database));

    let router = collection(
        router,
        "/info",
        post(info::create_stock_info).get(info::list_stock_infos),
    )
    .route("/info/id/:id", get(info::get_stock_info))
    .route("/info/ticker/:ticker", get(info::get_stock_info_by_ticker))
    .route(
        "/info/:id",
        axum::routing::put(info::update_stock_info).delete(info::delete_stock_info),
    );

    let router = collection(router, "/price", post(price::create_price))
        .route("/price/ticker/:ticker", get(price::list_prices_by_ticker))
        .route("/price/:id", get(price::get_price).delete(price::delete_price));

    let router = collection(router, "/transaction", post(transaction::create_transaction))
        .route("/transaction/user/:user_id", get(transaction::list_user_transactions))
        .route(
            "/transaction/:id",
            get(transaction::get_transaction)
                .put(transaction::update_transaction)
                .delete(transaction::delete_transaction),
        );

    collection(router, "/holding", post(holding::create_holding))
        .route("/holding/user/:user_id", get(holding::list_user_holdings))
        .route(
            "/holding/user/:user_id/ticker/:ticker",
            get(holding::get_user_holding_by_ticker),
        )
        .route(
            "/holding/:id",
            get(holding::get_holding)
                .put(holding::update_holding)
                .delete(holding::delete_holding),
        )
}
