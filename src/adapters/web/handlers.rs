//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::html_dashboard_adapter::DashboardPage;
use crate::domain::dashboard::DashboardView;
use crate::domain::display::DisplayRange;
use crate::domain::error::DashboardError;

use super::{status_from_error, AppState, WebError};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub symbol: Option<String>,
    pub range: Option<String>,
}

async fn run_analysis(
    state: &Arc<AppState>,
    symbol: String,
    range: DisplayRange,
) -> Result<DashboardView, DashboardError> {
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        state
            .dashboard
            .analyze(state.fetcher.as_ref(), &symbol, range)
    })
    .await
    .map_err(|e| DashboardError::Io(std::io::Error::other(e.to_string())))?
}

fn render_page(status: StatusCode, page: DashboardPage) -> Result<Response, WebError> {
    let html = page
        .render()
        .map_err(|e| WebError::internal(e.to_string()))?;
    Ok((status, Html(html)).into_response())
}

fn parse_range(raw: Option<&str>, default: DisplayRange) -> Result<DisplayRange, DashboardError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r.parse(),
        None => Ok(default),
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, WebError> {
    let symbol = query.symbol.unwrap_or_default();
    let range = match parse_range(query.range.as_deref(), state.default_range) {
        Ok(r) => r,
        Err(e) => {
            let page = DashboardPage::form_only(&symbol, state.default_range, Some(e.to_string()));
            return render_page(StatusCode::BAD_REQUEST, page);
        }
    };

    if symbol.trim().is_empty() {
        return render_page(StatusCode::OK, DashboardPage::form_only("", range, None));
    }

    match run_analysis(&state, symbol.clone(), range).await {
        Ok(view) => render_page(
            StatusCode::OK,
            DashboardPage::from_view(&view, state.chart_height).with_form(),
        ),
        Err(e) => {
            log::info!("dashboard request for {:?} failed: {}", symbol, e);
            let message = match &e {
                DashboardError::NoDataFound { symbol } => {
                    format!("Could not find data for {symbol}. Check the code and try again.")
                }
                other => other.to_string(),
            };
            render_page(
                status_from_error(&e),
                DashboardPage::form_only(&symbol, range, Some(message)),
            )
        }
    }
}

pub async fn api_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, WebError> {
    let symbol = query
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| WebError::bad_request("symbol query parameter is required"))?;
    let range = parse_range(query.range.as_deref(), state.default_range)?;
    let view = run_analysis(&state, symbol, range).await?;
    Ok(Json(view))
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
