//! Stock symbols and their market-qualified form.

use crate::domain::error::DashboardError;
use serde::Serialize;
use std::fmt;

/// A user-supplied stock code, trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, DashboardError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::InvalidSymbol {
                input: input.to_string(),
                reason: "symbol is empty".into(),
            });
        }
        if let Some(c) = trimmed.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(DashboardError::InvalidSymbol {
                input: input.to_string(),
                reason: format!("unexpected character {c:?}"),
            });
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A symbol combined with an exchange suffix, e.g. `2330.TW`.
/// Serializes as the joined ticker string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTicker {
    pub symbol: Symbol,
    pub suffix: String,
}

impl QualifiedTicker {
    pub fn new(symbol: Symbol, suffix: impl Into<String>) -> Self {
        Self {
            symbol,
            suffix: suffix.into(),
        }
    }

    pub fn ticker(&self) -> String {
        format!("{}{}", self.symbol, self.suffix)
    }
}

impl fmt::Display for QualifiedTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, self.suffix)
    }
}

impl Serialize for QualifiedTicker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let symbol = Symbol::parse("  aapl \n").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn parse_keeps_numeric_codes() {
        assert_eq!(Symbol::parse("2330").unwrap().as_str(), "2330");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = Symbol::parse("   ").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSymbol { .. }));
    }

    #[test]
    fn parse_rejects_punctuation() {
        let err = Symbol::parse("2330.TW").unwrap_err();
        match err {
            DashboardError::InvalidSymbol { input, reason } => {
                assert_eq!(input, "2330.TW");
                assert!(reason.contains("'.'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn qualified_ticker_display() {
        let symbol = Symbol::parse("2330").unwrap();
        assert_eq!(QualifiedTicker::new(symbol.clone(), ".TW").to_string(), "2330.TW");
        assert_eq!(QualifiedTicker::new(symbol, "").ticker(), "2330");
    }

    #[test]
    fn qualified_ticker_serializes_as_string() {
        let ticker = QualifiedTicker::new(Symbol::parse("6488").unwrap(), ".TWO");
        assert_eq!(serde_json::to_string(&ticker).unwrap(), "\"6488.TWO\"");
    }
}
