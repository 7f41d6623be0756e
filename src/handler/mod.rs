pub mod admin;
pub mod download;
pub mod error;
pub mod stock_holding_detail;
pub mod stock_info;
pub mod stock_price;
pub mod stock_transaction;
