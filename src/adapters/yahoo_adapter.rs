//! Yahoo Finance chart API adapter.
//!
//! Daily bars from `/v8/finance/chart/{ticker}`. Unknown tickers come back as
//! a 404 or a `chart.error` object; both read as an empty series.

use crate::domain::error::DashboardError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::resolver::Lookback;
use crate::domain::symbol::QualifiedTicker;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceFetcher;
use chrono::DateTime;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("trendscope/", env!("CARGO_PKG_VERSION"));

pub struct YahooAdapter {
    client: Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DashboardError::data_source(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let base_url = config
            .get_string("data", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = config.get_int("data", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
        let timeout = u64::try_from(timeout)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| {
                DashboardError::config_invalid("data", "timeout_secs", "must be positive")
            })?;
        Self::new(base_url, Duration::from_secs(timeout))
    }

    fn chart_url(&self, ticker: &QualifiedTicker) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }
}

impl PriceFetcher for YahooAdapter {
    fn fetch_series(
        &self,
        ticker: &QualifiedTicker,
        lookback: Lookback,
    ) -> Result<PriceSeries, DashboardError> {
        let url = self.chart_url(ticker);
        log::debug!("GET {} range={}", url, lookback.range_param());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", lookback.range_param().as_str()),
                ("interval", "1d"),
            ])
            .send()
            .map_err(|e| DashboardError::data_source(format!("yahoo request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::debug!("yahoo has no chart for {}", ticker);
            return Ok(PriceSeries::empty());
        }
        if !status.is_success() {
            return Err(DashboardError::data_source(format!(
                "yahoo returned status {} for {}",
                status, ticker
            )));
        }

        let body = response
            .text()
            .map_err(|e| DashboardError::data_source(format!("yahoo body read failed: {e}")))?;
        let series = parse_chart(&body)?;
        log::info!("fetched {} daily points for {}", series.len(), ticker);
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Decode a chart payload. Any "no such symbol" shape yields an empty series.
fn parse_chart(body: &str) -> Result<PriceSeries, DashboardError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| DashboardError::data_source(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = response.chart.error {
        log::debug!(
            "yahoo chart error {}: {}",
            error.code.unwrap_or_default(),
            error.description.unwrap_or_default()
        );
        return Ok(PriceSeries::empty());
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty());
    };
    let (Some(timestamps), Some(quote)) = (result.timestamp, result.indicators.quote.first())
    else {
        return Ok(PriceSeries::empty());
    };

    let offset = result.meta.gmtoffset;
    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(Some(close)) = quote.close.get(i) else {
            log::debug!("skipping bar {} with no close", ts);
            continue;
        };
        let date = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| DashboardError::data_source(format!("invalid timestamp {ts}")))?
            .date_naive();
        points.push(PricePoint {
            date,
            close: *close,
        });
    }

    Ok(PriceSeries::from_unsorted(points))
}
