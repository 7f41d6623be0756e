use std::sync::Arc;

use anyhow::{Context, Result};

use stock_playground::app::{self, AppState};
use stock_playground::db;
use stock_playground::utils::{config::AppConfig, http_client, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    let db_pool = db::create_pool(&config.database_url, config.db_pool_size)?;
    {
        let mut conn = db_pool.get().context("failed to get DB connection")?;
        db::run_migrations(&mut conn)?;
    }

    let http_client = http_client::create_market_data_client().context("failed to build HTTP client")?;
    let addr = config.addr;
    let state = AppState {
        db_pool,
        http_client,
        config: Arc::new(config),
    };
    let app = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Stock playground listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
