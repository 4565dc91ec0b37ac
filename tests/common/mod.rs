#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use trendscope::domain::error::DashboardError;
use trendscope::domain::price_series::{PricePoint, PriceSeries};
use trendscope::domain::resolver::Lookback;
use trendscope::domain::symbol::QualifiedTicker;
use trendscope::ports::data_port::PriceFetcher;

/// In-memory fetcher keyed by qualified ticker, e.g. `2330.TW`.
/// Every call is recorded so tests can assert on probe order.
pub struct MockFetcher {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.data.insert(ticker.to_string(), series);
        self
    }

    pub fn with_closes(self, ticker: &str, closes: &[f64]) -> Self {
        self.with_series(ticker, series_from_closes(closes))
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PriceFetcher for MockFetcher {
    fn fetch_series(
        &self,
        ticker: &QualifiedTicker,
        _lookback: Lookback,
    ) -> Result<PriceSeries, DashboardError> {
        let key = ticker.to_string();
        self.calls.lock().unwrap().push(key.clone());
        if let Some(reason) = self.errors.get(&key) {
            return Err(DashboardError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(&key).cloned().unwrap_or_else(PriceSeries::empty))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One point per calendar day starting 2024-01-01.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect(),
    )
    .unwrap()
}

/// `count` weekday sessions with a gentle sawtooth around `start_price`.
pub fn generate_series(start_date: &str, count: usize, start_price: f64) -> PriceSeries {
    let mut day = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        use chrono::Datelike;
        if day.weekday().number_from_monday() <= 5 {
            let i = points.len();
            let close = start_price + (i as f64) * 0.1 + ((i % 7) as f64 - 3.0);
            points.push(PricePoint { date: day, close });
        }
        day = day.succ_opt().unwrap();
    }
    PriceSeries::new(points).unwrap()
}
