//! Domain error types.

/// Top-level error type for trendscope.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid symbol {input:?}: {reason}")]
    InvalidSymbol { input: String, reason: String },

    #[error("no data found for {symbol}")]
    NoDataFound { symbol: String },

    #[error("insufficient history for {symbol}: have {available} points, need {required}")]
    InsufficientHistory {
        symbol: String,
        required: usize,
        available: usize,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        DashboardError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn data_source(reason: impl Into<String>) -> Self {
        DashboardError::DataSource {
            reason: reason.into(),
        }
    }
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigMissing { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::DataSource { .. } => 3,
            DashboardError::InvalidSymbol { .. } => 4,
            DashboardError::NoDataFound { .. } | DashboardError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
