//! Moving-average indicator and the engine that applies it per symbol.
//!
//! - `IndicatorPoint`: one point of an indicator series, `None` during warmup
//! - `IndicatorSeries`: indicator values aligned with a price series
//! - `IndicatorEngine`: window lookup + SMA + trend classification

pub mod sma;

use crate::domain::error::DashboardError;
use crate::domain::price_series::PriceSeries;
use crate::domain::symbol::Symbol;
use crate::domain::trend::{classify, TrendState};
use crate::domain::window_config::WindowConfig;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub window: usize,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.value.is_some()).count()
    }

    /// Most recent defined value.
    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|p| p.value)
    }

    pub fn tail(&self, count: usize) -> IndicatorSeries {
        let start = self.values.len().saturating_sub(count);
        IndicatorSeries {
            window: self.window,
            values: self.values[start..].to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub window: usize,
    pub indicator: IndicatorSeries,
    pub trend: TrendState,
}

pub struct IndicatorEngine {
    windows: WindowConfig,
}

impl IndicatorEngine {
    pub fn new(windows: WindowConfig) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &WindowConfig {
        &self.windows
    }

    pub fn window_for(&self, symbol: &Symbol) -> usize {
        self.windows.window_for(symbol)
    }

    pub fn indicator(&self, symbol: &Symbol, series: &PriceSeries) -> IndicatorSeries {
        sma::calculate_sma(series.points(), self.window_for(symbol))
    }

    /// Trend at the last defined point of an already computed indicator.
    pub fn trend(
        &self,
        symbol: &Symbol,
        series: &PriceSeries,
        indicator: &IndicatorSeries,
    ) -> Result<TrendState, DashboardError> {
        classify(series, indicator).ok_or_else(|| DashboardError::InsufficientHistory {
            symbol: symbol.to_string(),
            required: indicator.window,
            available: series.len(),
        })
    }

    /// SMA over the full series plus the trend at its last defined point.
    pub fn compute(
        &self,
        symbol: &Symbol,
        series: &PriceSeries,
    ) -> Result<TrendAnalysis, DashboardError> {
        let indicator = self.indicator(symbol, series);
        let trend = self.trend(symbol, series, &indicator)?;
        Ok(TrendAnalysis {
            window: indicator.window,
            indicator,
            trend,
        })
    }
}
