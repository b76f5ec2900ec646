//! breakwatch gateway binary.
//!
//! Loads `breakwatch.yaml` (or `$BREAKWATCH_CONFIG`), registers the configured
//! breakers, serves the report until Ctrl-C, then clears the registry.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use breakwatch_core::error::{BreakwatchError, Result};
use breakwatch_core::BreakerRegistry;
use breakwatch_gateway::{app_state, config, router, server};

const DEFAULT_CONFIG_PATH: &str = "breakwatch.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("BREAKWATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let registry = Arc::new(BreakerRegistry::new());
    let state = app_state::AppState::new(cfg, Arc::clone(&registry))?;
    let app = router::build_router(state);

    tracing::info!(%listen, breakers = registry.len(), "breakwatch-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| BreakwatchError::Internal(format!("bind {listen} failed: {e}")))?;

    server::serve_until(listener, app, registry, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; shutting down");
    }
}
