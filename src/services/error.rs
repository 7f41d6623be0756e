use thiserror::Error;

use crate::services::price_adapter::AdapterError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// 把 diesel 的 NotFound 转成带资源描述的 ServiceError::NotFound
pub trait NotFoundExt<T> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, ServiceError>;
}

impl<T> NotFoundExt<T> for Result<T, diesel::result::Error> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, ServiceError> {
        match self {
            Ok(v) => Ok(v),
            Err(diesel::result::Error::NotFound) => Err(ServiceError::NotFound(what())),
            Err(e) => Err(ServiceError::Database(e)),
        }
    }
}
