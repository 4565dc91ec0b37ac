//! Display windowing of computed series.
//!
//! Truncation happens only after the indicator has been computed over the
//! full fetched history, so the visible averages never see a short input.

use crate::domain::error::DashboardError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::price_series::PriceSeries;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisplayRange {
    Quarter,
    HalfYear,
    #[default]
    Year,
}

impl DisplayRange {
    /// Number of trading days shown.
    pub fn count(&self) -> usize {
        match self {
            DisplayRange::Quarter => 60,
            DisplayRange::HalfYear => 120,
            DisplayRange::Year => 240,
        }
    }

    pub fn all() -> [DisplayRange; 3] {
        [
            DisplayRange::Quarter,
            DisplayRange::HalfYear,
            DisplayRange::Year,
        ]
    }
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl FromStr for DisplayRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "60" | "3m" => Ok(DisplayRange::Quarter),
            "120" | "6m" => Ok(DisplayRange::HalfYear),
            "240" | "1y" => Ok(DisplayRange::Year),
            other => Err(DashboardError::config_invalid(
                "display",
                "range",
                format!("expected 60, 120 or 240, got {other:?}"),
            )),
        }
    }
}

/// The last `count` points of both series, still date-aligned.
pub fn select(
    prices: &PriceSeries,
    indicator: &IndicatorSeries,
    count: usize,
) -> (PriceSeries, IndicatorSeries) {
    (prices.tail(count), indicator.tail(count))
}
