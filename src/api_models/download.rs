use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::price_adapter::AdapterOptions;
use crate::services::stock_service::StockMetadata;

fn default_true() -> bool {
    true
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// 下载区间为 [start, end)，end 当天不包含
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default = "default_true")]
    pub auto_adjust: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub name: Option<String>,
    pub market: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl DownloadRequest {
    pub fn metadata(&self) -> StockMetadata {
        StockMetadata {
            name: self.name.clone(),
            market: self.market.clone(),
            currency: self.currency.clone(),
        }
    }

    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            market: self.market.clone(),
            currency: self.currency.clone(),
            auto_adjust: self.auto_adjust,
            timezone: self.timezone.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub saved: usize,
}
