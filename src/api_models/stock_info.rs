use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api_models::stock_price::StockPriceResponse;
use crate::models::StockInfo;
use crate::services::stock_service::{StockInfoPatch, StockInfoWithPrices, StockMetadata};

#[derive(Debug, Deserialize)]
pub struct CreateStockInfoRequest {
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: Option<String>,
}

impl CreateStockInfoRequest {
    pub fn metadata(&self) -> StockMetadata {
        let mut metadata = StockMetadata {
            name: self.name.clone(),
            market: self.market.clone(),
            ..Default::default()
        };
        if let Some(currency) = &self.currency {
            metadata.currency = currency.clone();
        }
        metadata
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStockInfoRequest {
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: Option<String>,
}

impl From<UpdateStockInfoRequest> for StockInfoPatch {
    fn from(req: UpdateStockInfoRequest) -> Self {
        Self {
            name: req.name,
            market: req.market,
            currency: req.currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StockInfoResponse {
    pub id: i32,
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StockInfo> for StockInfoResponse {
    fn from(info: StockInfo) -> Self {
        Self {
            id: info.id,
            ticker: info.ticker,
            name: info.name,
            market: info.market,
            currency: info.currency,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// 股票信息连同全部价格
#[derive(Debug, Serialize)]
pub struct StockInfoWithPricesResponse {
    #[serde(flatten)]
    pub info: StockInfoResponse,
    pub prices: Vec<StockPriceResponse>,
}

impl From<StockInfoWithPrices> for StockInfoWithPricesResponse {
    fn from(value: StockInfoWithPrices) -> Self {
        Self {
            info: value.info.into(),
            prices: value.prices.into_iter().map(Into::into).collect(),
        }
    }
}
