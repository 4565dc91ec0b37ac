//! Ticker resolution by ordered suffix probing.
//!
//! A bare code like `2330` may be listed on more than one venue. Candidates
//! are tried in order and the first one the fetcher has data for wins.

use crate::domain::error::DashboardError;
use crate::domain::price_series::PriceSeries;
use crate::domain::symbol::{QualifiedTicker, Symbol};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceFetcher;
use std::collections::HashSet;
use std::fmt;

/// Listed exchange, then OTC, then the code as given (US and other tickers).
pub const DEFAULT_SUFFIXES: [&str; 3] = [".TW", ".TWO", ""];
pub const DEFAULT_LOOKBACK_YEARS: u32 = 2;
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Config token standing for "no suffix".
const BARE_TOKEN: &str = "bare";

/// How much daily history to request, in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    years: u32,
}

impl Lookback {
    pub fn years(years: u32) -> Result<Self, DashboardError> {
        if years == 0 {
            return Err(DashboardError::config_invalid(
                "resolver",
                "lookback_years",
                "lookback must be at least 1 year",
            ));
        }
        Ok(Self { years })
    }

    pub fn as_years(&self) -> u32 {
        self.years
    }

    /// Approximate number of trading sessions covered.
    pub fn trading_days(&self) -> usize {
        self.years as usize * TRADING_DAYS_PER_YEAR
    }

    /// Yahoo-style range parameter, e.g. `2y`.
    pub fn range_param(&self) -> String {
        format!("{}y", self.years)
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self {
            years: DEFAULT_LOOKBACK_YEARS,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y", self.years)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerResolver {
    suffixes: Vec<String>,
    lookback: Lookback,
}

impl TickerResolver {
    pub fn new(suffixes: Vec<String>, lookback: Lookback) -> Result<Self, DashboardError> {
        if suffixes.is_empty() {
            return Err(DashboardError::config_invalid(
                "resolver",
                "suffixes",
                "at least one suffix candidate is required",
            ));
        }
        let mut seen = HashSet::new();
        for suffix in &suffixes {
            if !seen.insert(suffix.as_str()) {
                return Err(DashboardError::config_invalid(
                    "resolver",
                    "suffixes",
                    format!("duplicate suffix {suffix:?}"),
                ));
            }
        }
        Ok(Self { suffixes, lookback })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let suffixes = match config.get_string("resolver", "suffixes") {
            Some(raw) => parse_suffixes(&raw)?,
            None => DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        };

        let lookback = match config.get_string("resolver", "lookback_years") {
            Some(raw) => {
                let years: u32 = raw.trim().parse().map_err(|_| {
                    DashboardError::config_invalid(
                        "resolver",
                        "lookback_years",
                        format!("expected a whole number, got {raw:?}"),
                    )
                })?;
                Lookback::years(years)?
            }
            None => Lookback::default(),
        };

        Self::new(suffixes, lookback)
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn lookback(&self) -> Lookback {
        self.lookback
    }

    pub fn candidates(&self, symbol: &Symbol) -> Vec<QualifiedTicker> {
        self.suffixes
            .iter()
            .map(|suffix| QualifiedTicker::new(symbol.clone(), suffix.as_str()))
            .collect()
    }

    /// Probe candidates in order and return the first non-empty series.
    ///
    /// An empty result moves on to the next candidate; a fetch error stops
    /// the probe and is returned as is.
    pub fn resolve(
        &self,
        fetcher: &dyn PriceFetcher,
        symbol: &Symbol,
    ) -> Result<(QualifiedTicker, PriceSeries), DashboardError> {
        for candidate in self.candidates(symbol) {
            log::debug!("probing {} ({} lookback)", candidate, self.lookback);
            let series = fetcher.fetch_series(&candidate, self.lookback)?;
            if series.is_empty() {
                log::debug!("no data under {}", candidate);
                continue;
            }
            log::info!(
                "resolved {} to {} ({} points)",
                symbol,
                candidate,
                series.len()
            );
            return Ok((candidate, series));
        }

        Err(DashboardError::NoDataFound {
            symbol: symbol.to_string(),
        })
    }
}

impl Default for TickerResolver {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            lookback: Lookback::default(),
        }
    }
}

fn parse_suffixes(raw: &str) -> Result<Vec<String>, DashboardError> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                Err(DashboardError::config_invalid(
                    "resolver",
                    "suffixes",
                    "empty suffix token (use `bare` for no suffix)",
                ))
            } else if token.eq_ignore_ascii_case(BARE_TOKEN) {
                Ok(String::new())
            } else {
                Ok(token.to_ascii_uppercase())
            }
        })
        .collect()
}
