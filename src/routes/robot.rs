use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::stock_info::{
    create_stock_info, delete_stock_info, get_stock_info_by_ticker, list_stock_infos,
    update_stock_info,
};

/// 给自动化脚本用的精简股票信息接口。
/// GET 按 ticker 查询，PUT / DELETE 按 id 操作，共用一个路径参数名。
pub fn router() -> Router<AppState> {
    let list = get(list_stock_infos).post(create_stock_info);
    Router::new()
        .route("/stocks", list.clone())
        .route("/stocks/", list)
        .route(
            "/stocks/:key",
            get(get_stock_info_by_ticker)
                .put(update_stock_info)
                .delete(delete_stock_info),
        )
}
