//! Serve loop with registry teardown.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use breakwatch_core::error::{BreakwatchError, Result};
use breakwatch_core::BreakerRegistry;

/// Serve `app` until `shutdown` resolves, then clear `registry`.
///
/// The registry is cleared whether the server stopped gracefully or failed;
/// a server error is returned afterwards.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    registry: Arc<BreakerRegistry>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    registry.clear();
    tracing::info!("breakwatch-gateway stopped");
    served.map_err(|e| BreakwatchError::Internal(format!("server failed: {e}")))
}
