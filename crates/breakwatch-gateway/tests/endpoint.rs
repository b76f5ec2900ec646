//! HTTP surface: `/failsafe`, `/metrics`, `/healthz`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use breakwatch_core::{BreakerRegistry, BreakerStateRecord, ManualBreaker};
use breakwatch_gateway::{app_state::AppState, config, router};

const BREAKER_NAME: &str = "testBreaker";

fn app(yaml: &str) -> (AppState, Router) {
    let cfg = config::load_from_str(yaml).unwrap();
    let state = AppState::new(cfg, Arc::new(BreakerRegistry::new())).unwrap();
    let router = router::build_router(state.clone());
    (state, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let resp = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn fetch_breaker(router: &Router) -> BreakerStateRecord {
    let (status, body) = get(router, "/failsafe").await;
    assert_eq!(status, StatusCode::OK);
    let records: Vec<BreakerStateRecord> = serde_json::from_str(&body).unwrap();
    assert_eq!(records.len(), 1);
    records.into_iter().next().unwrap()
}

#[tokio::test]
async fn endpoint_follows_breaker_state() {
    let (state, router) = app("version: 1\nbreakers:\n  - name: \"testBreaker\"\n");
    let breaker = state.configured_breaker(BREAKER_NAME).unwrap();

    let s = fetch_breaker(&router).await;
    assert_eq!(s.name, BREAKER_NAME);
    assert!(s.closed && !s.open && !s.half_open);

    breaker.open();
    let s = fetch_breaker(&router).await;
    assert_eq!(s.name, BREAKER_NAME);
    assert!(!s.closed && s.open && !s.half_open);

    breaker.half_open();
    let s = fetch_breaker(&router).await;
    assert_eq!(s.name, BREAKER_NAME);
    assert!(!s.closed && !s.open && s.half_open);
}

#[tokio::test]
async fn wire_format_is_camel_case() {
    let (_state, router) = app("version: 1\nbreakers:\n  - name: \"b\"\n    initial_state: half_open\n");
    let (_, body) = get(&router, "/failsafe").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "name": "b", "closed": false, "open": false, "halfOpen": true }])
    );
}

#[tokio::test]
async fn empty_registry_is_an_empty_list() {
    let (_state, router) = app("version: 1\n");
    let (status, body) = get(&router, "/failsafe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn breakers_registered_after_startup_are_reported() {
    let (state, router) = app("version: 1\nbreakers:\n  - name: \"first\"\n");
    state
        .registry()
        .register("second", Arc::new(ManualBreaker::default()))
        .unwrap();

    let (_, body) = get(&router, "/failsafe").await;
    let records: Vec<BreakerStateRecord> = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[tokio::test]
async fn disabled_failsafe_is_not_mounted() {
    let (_state, router) = app("version: 1\nendpoints:\n  enabled: false\n");
    let (status, _) = get(&router, "/failsafe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&router, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn custom_path_is_honoured() {
    let (_state, router) = app("version: 1\nendpoints:\n  failsafe:\n    path: \"/ops/breakers\"\n");
    assert_eq!(get(&router, "/ops/breakers").await.0, StatusCode::OK);
    assert_eq!(get(&router, "/failsafe").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_expose_breaker_states() {
    let (state, router) = app("version: 1\nbreakers:\n  - name: \"testBreaker\"\n");
    state.configured_breaker(BREAKER_NAME).unwrap().open();
    get(&router, "/failsafe").await;

    let (status, body) = get(&router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("breakwatch_breakers_registered 1"));
    assert!(body.contains("breakwatch_breaker_state{name=\"testBreaker\",state=\"open\"} 1"));
    assert!(body.contains("breakwatch_breaker_state{name=\"testBreaker\",state=\"closed\"} 0"));
    assert!(body.contains("breakwatch_report_requests_total 1"));
}

#[tokio::test]
async fn cleared_registry_reports_nothing() {
    let (state, router) = app("version: 1\nbreakers:\n  - name: \"testBreaker\"\n");
    state.registry().clear();

    let (_, body) = get(&router, "/failsafe").await;
    assert_eq!(body, "[]");
    assert!(!state.registry().contains(BREAKER_NAME));
}
