pub mod download;
pub mod stock_holding_detail;
pub mod stock_info;
pub mod stock_price;
pub mod stock_transaction;

use serde::Serialize;

/// 删除类接口的统一返回
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
