pub mod stock_info;
pub mod stock_price;
pub mod stock_transaction;
pub mod stock_holding_detail;
