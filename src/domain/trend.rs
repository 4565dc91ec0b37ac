//! Trend classification from the latest price / moving-average pair.

use crate::domain::indicator::IndicatorSeries;
use crate::domain::price_series::PriceSeries;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    Bullish,
    Bearish,
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendState::Bullish => write!(f, "Bullish"),
            TrendState::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Trend as reported to the presentation layer. `Undetermined` is the
/// recovered form of insufficient history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendReading {
    Determined { state: TrendState },
    Undetermined { required: usize, available: usize },
}

impl TrendReading {
    pub fn state(&self) -> Option<TrendState> {
        match self {
            TrendReading::Determined { state } => Some(*state),
            TrendReading::Undetermined { .. } => None,
        }
    }
}

impl fmt::Display for TrendReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendReading::Determined { state } => write!(f, "{state}"),
            TrendReading::Undetermined { .. } => write!(f, "Undetermined"),
        }
    }
}

/// Classify using the last point whose indicator is defined.
///
/// Bullish only when price is strictly above the average; a tie is Bearish.
pub fn classify(prices: &PriceSeries, indicator: &IndicatorSeries) -> Option<TrendState> {
    prices
        .points()
        .iter()
        .zip(&indicator.values)
        .rev()
        .find_map(|(price, point)| point.value.map(|avg| (price.close, avg)))
        .map(|(close, avg)| {
            if close > avg {
                TrendState::Bullish
            } else {
                TrendState::Bearish
            }
        })
}
