//! Entry point for the Purchase Engine binary.
//!
//! Running this binary starts an HTTP server exposing the purchase and
//! return validation API.  The bind address and default log filter are
//! read from the environment; see [`purchase_engine::config`].

use purchase_engine::config::{EngineConfig, DEFAULT_LOG_FILTER};
use purchase_engine::{api, telemetry, SystemClock};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            telemetry::init_tracing(DEFAULT_LOG_FILTER);
            tracing::warn!(error = %err, "invalid configuration, not starting");
            return Err(err.into());
        }
    };
    telemetry::init_tracing(&config.log_filter);
    tracing::info!(addr = %config.bind_addr, "starting purchase engine");

    if let Err(err) = api::serve(&config, Arc::new(SystemClock)).await {
        tracing::error!(error = %err, "server stopped");
        return Err(err);
    }
    Ok(())
}
