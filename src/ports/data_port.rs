//! Price series access port trait.

use crate::domain::error::DashboardError;
use crate::domain::price_series::PriceSeries;
use crate::domain::resolver::Lookback;
use crate::domain::symbol::QualifiedTicker;

/// Source of daily closing prices.
///
/// Unknown or delisted tickers must yield an empty series rather than an
/// error: the resolver moves to its next suffix candidate only on empty.
pub trait PriceFetcher {
    fn fetch_series(
        &self,
        ticker: &QualifiedTicker,
        lookback: Lookback,
    ) -> Result<PriceSeries, DashboardError>;
}
