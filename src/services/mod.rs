pub mod error;
pub mod holding_service;
pub mod market_data;
pub mod price_adapter;
pub mod price_frame;
pub mod stock_service;
pub mod transaction_service;

pub use error::ServiceError;
