pub mod stock_info;
pub mod stock_price;
pub mod stock_transaction;
pub mod stock_holding_detail;

pub use stock_info::{NewStockInfo, StockInfo, UpdateStockInfo};
pub use stock_price::{NewStockPrice, StockPrice};
pub use stock_transaction::{NewStockTransaction, StockTransaction, UpdateStockTransaction};
pub use stock_holding_detail::{NewStockHoldingDetail, StockHoldingDetail, UpdateStockHoldingDetail};
