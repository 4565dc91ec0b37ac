//! Web server adapter.
//!
//! Axum server with a query form at `/` and a JSON endpoint at
//! `/api/dashboard`. The price fetcher is blocking, so every analysis runs on
//! the blocking thread pool.

mod error;
mod handlers;

pub use error::{status_from_error, WebError};
pub use handlers::*;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::dashboard::Dashboard;
use crate::domain::display::DisplayRange;
use crate::ports::data_port::PriceFetcher;

pub struct AppState {
    pub fetcher: Arc<dyn PriceFetcher + Send + Sync>,
    pub dashboard: Arc<Dashboard>,
    pub default_range: DisplayRange,
    pub chart_height: u32,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::api_dashboard))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
