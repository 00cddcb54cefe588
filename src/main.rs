use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use txledger::api::rest::{ApiState, create_router};
use txledger::config::AppConfig;
use txledger::currency::IsoCurrencyTable;
use txledger::ledger::service::LedgerService;
use txledger::observability::metrics::register_metrics;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("txledger=info,tower_http=info")),
        )
        .init();

    let env = std::env::var("RUN_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = AppConfig::load(&env).context("loading configuration")?;

    register_metrics();

    let service = LedgerService::new(Arc::new(IsoCurrencyTable));
    let state = Arc::new(ApiState {
        ledger: RwLock::new(service),
    });
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind listener on {}", addr))?;
    tracing::info!("transaction ledger API listening on {}", addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
