//! Per-symbol moving-average window lengths.
//!
//! The table is built once at startup and handed to the indicator engine; it
//! never changes afterwards.

use crate::domain::error::DashboardError;
use crate::domain::symbol::Symbol;
use crate::ports::config_port::ConfigPort;
use std::collections::BTreeMap;

pub const DEFAULT_WINDOW: usize = 20;

const BUILTIN_WINDOWS: [(&str, usize); 5] = [
    ("2330", 17),
    ("2317", 18),
    ("2303", 21),
    ("2454", 29),
    ("2603", 35),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    default_window: usize,
    overrides: BTreeMap<Symbol, usize>,
}

impl WindowConfig {
    pub fn new<I>(default_window: usize, overrides: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = (Symbol, usize)>,
    {
        if default_window == 0 {
            return Err(DashboardError::config_invalid(
                "indicator",
                "default_window",
                "window must be at least 1",
            ));
        }
        let mut table = BTreeMap::new();
        for (symbol, window) in overrides {
            if window == 0 {
                return Err(DashboardError::config_invalid(
                    "windows",
                    &symbol.to_string().to_lowercase(),
                    "window must be at least 1",
                ));
            }
            table.insert(symbol, window);
        }
        Ok(Self {
            default_window,
            overrides: table,
        })
    }

    /// The built-in table: tuned windows for a handful of large-cap codes,
    /// 20 for everything else.
    pub fn builtin() -> Self {
        let overrides = BUILTIN_WINDOWS
            .iter()
            .filter_map(|(code, window)| Symbol::parse(code).ok().map(|s| (s, *window)))
            .collect();
        Self {
            default_window: DEFAULT_WINDOW,
            overrides,
        }
    }

    /// Built-in table with `[windows]` entries merged on top and
    /// `[indicator] default_window` replacing the default.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let builtin = Self::builtin();

        let default_window = match config.get_string("indicator", "default_window") {
            Some(raw) => parse_window("indicator", "default_window", &raw)?,
            None => builtin.default_window,
        };

        let mut overrides = builtin.overrides;
        for key in config.get_keys("windows") {
            let symbol = Symbol::parse(&key).map_err(|e| {
                DashboardError::config_invalid("windows", &key, e.to_string())
            })?;
            let raw = config
                .get_string("windows", &key)
                .ok_or_else(|| DashboardError::ConfigMissing {
                    section: "windows".into(),
                    key: key.clone(),
                })?;
            overrides.insert(symbol, parse_window("windows", &key, &raw)?);
        }

        Self::new(default_window, overrides)
    }

    /// Window for the user's symbol; the market suffix plays no part.
    pub fn window_for(&self, symbol: &Symbol) -> usize {
        self.overrides
            .get(symbol)
            .copied()
            .unwrap_or(self.default_window)
    }

    pub fn default_window(&self) -> usize {
        self.default_window
    }

    pub fn max_window(&self) -> usize {
        self.overrides
            .values()
            .copied()
            .chain(std::iter::once(self.default_window))
            .max()
            .unwrap_or(self.default_window)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.overrides.iter().map(|(s, w)| (s, *w))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_window(section: &str, key: &str, raw: &str) -> Result<usize, DashboardError> {
    let window: usize = raw.trim().parse().map_err(|_| {
        DashboardError::config_invalid(section, key, format!("expected a whole number, got {raw:?}"))
    })?;
    if window == 0 {
        return Err(DashboardError::config_invalid(
            section,
            key,
            "window must be at least 1",
        ));
    }
    Ok(window)
}
