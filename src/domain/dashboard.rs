//! End-to-end dashboard pipeline.
//!
//! symbol → resolve + fetch → full-history SMA and trend → display window.

use crate::domain::display::{self, DisplayRange};
use crate::domain::error::DashboardError;
use crate::domain::indicator::{IndicatorEngine, IndicatorSeries};
use crate::domain::price_series::PriceSeries;
use crate::domain::resolver::TickerResolver;
use crate::domain::symbol::{QualifiedTicker, Symbol};
use crate::domain::trend::TrendReading;
use crate::ports::data_port::PriceFetcher;
use serde::Serialize;

/// Everything the presentation layer needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub symbol: Symbol,
    pub resolved_ticker: QualifiedTicker,
    pub last_price: f64,
    pub last_indicator_value: Option<f64>,
    pub trend: TrendReading,
    pub window_length: usize,
    pub display_range: DisplayRange,
    pub display_prices: PriceSeries,
    pub display_indicator: IndicatorSeries,
    pub history_len: usize,
}

impl DashboardView {
    pub fn indicator_label(&self) -> String {
        format!("SMA({})", self.window_length)
    }
}

pub struct Dashboard {
    resolver: TickerResolver,
    engine: IndicatorEngine,
}

impl Dashboard {
    pub fn new(resolver: TickerResolver, engine: IndicatorEngine) -> Self {
        Self { resolver, engine }
    }

    pub fn resolver(&self) -> &TickerResolver {
        &self.resolver
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub fn analyze(
        &self,
        fetcher: &dyn PriceFetcher,
        raw_symbol: &str,
        range: DisplayRange,
    ) -> Result<DashboardView, DashboardError> {
        let symbol = Symbol::parse(raw_symbol)?;
        let (resolved_ticker, history) = self.resolver.resolve(fetcher, &symbol)?;

        let last_price = match history.last() {
            Some(point) => point.close,
            None => {
                return Err(DashboardError::NoDataFound {
                    symbol: symbol.to_string(),
                });
            }
        };

        let indicator = self.engine.indicator(&symbol, &history);
        let trend = match self.engine.trend(&symbol, &history, &indicator) {
            Ok(state) => TrendReading::Determined { state },
            Err(DashboardError::InsufficientHistory {
                required,
                available,
                ..
            }) => {
                log::warn!(
                    "{} has {} points, {} needed for {}; trend undetermined",
                    resolved_ticker,
                    available,
                    required,
                    symbol
                );
                TrendReading::Undetermined {
                    required,
                    available,
                }
            }
            Err(e) => return Err(e),
        };

        let last_indicator_value = indicator.last_value();
        let window_length = indicator.window;
        let (display_prices, display_indicator) =
            display::select(&history, &indicator, range.count());

        Ok(DashboardView {
            symbol,
            resolved_ticker,
            last_price,
            last_indicator_value,
            trend,
            window_length,
            display_range: range,
            display_prices,
            display_indicator,
            history_len: history.len(),
        })
    }
}
