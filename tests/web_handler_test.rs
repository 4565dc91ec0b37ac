#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Query form on a bare request
//! - Dashboard page for a known symbol
//! - Not-found message for unknown symbols
//! - JSON endpoint and fallback route

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use trendscope::adapters::web::{build_router, AppState};
use trendscope::domain::dashboard::Dashboard;
use trendscope::domain::display::DisplayRange;
use trendscope::domain::indicator::IndicatorEngine;
use trendscope::domain::resolver::TickerResolver;
use trendscope::domain::window_config::WindowConfig;

use common::*;

fn create_test_app() -> Router {
    let fetcher = MockFetcher::new()
        .with_series("2330.TW", generate_series("2023-01-02", 300, 600.0))
        .with_series("6488.TWO", generate_series("2024-01-01", 10, 400.0));

    let state = AppState {
        fetcher: Arc::new(fetcher),
        dashboard: Arc::new(Dashboard::new(
            TickerResolver::default(),
            IndicatorEngine::new(WindowConfig::builtin()),
        )),
        default_range: DisplayRange::Year,
        chart_height: 450,
    };
    build_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn index_without_symbol_shows_form() {
    let (status, body) = get(create_test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(body.contains("<option value=\"240\" selected>"));
    assert!(!body.contains("<svg"));
}

#[tokio::test]
async fn index_with_symbol_renders_dashboard() {
    let (status, body) = get(create_test_app(), "/?symbol=2330&range=60").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(body.contains("2330.TW"));
    assert!(body.contains("SMA(17)"));
    assert!(body.contains("<svg"));
    assert!(body.contains("height=\"450\""));
    assert!(body.contains("<option value=\"60\" selected>"));
}

#[tokio::test]
async fn index_short_history_is_undetermined() {
    let (status, body) = get(create_test_app(), "/?symbol=6488").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("6488.TWO"));
    assert!(body.contains("Undetermined (10 of 20 sessions)"));
}

#[tokio::test]
async fn index_unknown_symbol_shows_message() {
    let (status, body) = get(create_test_app(), "/?symbol=9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Could not find data for 9999"));
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn index_bad_range_is_bad_request() {
    let (status, body) = get(create_test_app(), "/?symbol=2330&range=90").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("expected 60, 120 or 240"));
}

#[tokio::test]
async fn api_returns_json_view() {
    let (status, body) = get(create_test_app(), "/api/dashboard?symbol=2330&range=3m").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["resolved_ticker"], "2330.TW");
    assert_eq!(json["window_length"], 17);
    assert_eq!(json["history_len"], 300);
    assert_eq!(json["display_prices"].as_array().unwrap().len(), 60);
    assert_eq!(json["trend"]["status"], "determined");
}

#[tokio::test]
async fn api_requires_symbol() {
    let (status, _) = get(create_test_app(), "/api/dashboard").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_unknown_symbol_is_404() {
    let (status, body) = get(create_test_app(), "/api/dashboard?symbol=9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("no data found for 9999"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get(create_test_app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
