use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::services::market_data::DEFAULT_CHART_URL;

/// 进程级配置，启动时从环境变量（及 .env）读取一次
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_pool_size: u32,
    pub market_data_url: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8001);
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT: {}:{}", host, port))?;

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let db_pool_size = std::env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let market_data_url =
            std::env::var("MARKET_DATA_URL").unwrap_or_else(|_| DEFAULT_CHART_URL.to_string());

        Ok(Self {
            addr,
            database_url,
            db_pool_size,
            market_data_url,
            allowed_origins: parse_origins(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
