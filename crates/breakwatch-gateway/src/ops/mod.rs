//! Operational HTTP endpoints.
//!
//! - `/healthz`  : liveness
//! - `/failsafe` : breaker state report (path configurable)
//! - `/metrics`  : Prometheus text format

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use breakwatch_core::BreakerStateRecord;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn failsafe(State(state): State<AppState>) -> Json<Vec<BreakerStateRecord>> {
    state.metrics().report_requests.inc(&[]);
    Json(state.reporter().report())
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let records = state.reporter().report();
    let body = state.metrics().render(&records);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
