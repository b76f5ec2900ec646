//! Axum router wiring.
//!
//! `/healthz` and `/metrics` are always mounted. The breaker report is mounted
//! at `endpoints.failsafe.path` only when the failsafe endpoint is enabled.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics));

    if state.cfg().endpoints.failsafe_enabled() {
        let path = state.cfg().endpoints.failsafe.path.clone();
        tracing::info!(%path, "failsafe endpoint enabled");
        router = router.route(&path, get(ops::failsafe));
    } else {
        tracing::info!("failsafe endpoint disabled");
    }

    router.with_state(state)
}
