//! Configuration validation.
//!
//! Validates every config field before any pipeline runs.

use crate::domain::display::DisplayRange;
use crate::domain::error::DashboardError;
use crate::domain::resolver::TickerResolver;
use crate::domain::window_config::WindowConfig;
use crate::ports::config_port::ConfigPort;

pub const DATA_SOURCES: [&str; 2] = ["yahoo", "csv"];
pub const MIN_CHART_HEIGHT: i64 = 100;

pub fn validate_dashboard_config(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let windows = WindowConfig::from_config(config)?;
    let resolver = TickerResolver::from_config(config)?;
    validate_lookback_coverage(&windows, &resolver)?;
    validate_data_source(config)?;
    validate_timeout(config)?;
    validate_display(config)?;
    Ok(())
}

/// The fetched history must hold at least twice the largest window so every
/// configured average is fully warmed up well before the display range.
fn validate_lookback_coverage(
    windows: &WindowConfig,
    resolver: &TickerResolver,
) -> Result<(), DashboardError> {
    let needed = windows.max_window() * 2;
    let available = resolver.lookback().trading_days();
    if available < needed {
        return Err(DashboardError::config_invalid(
            "resolver",
            "lookback_years",
            format!(
                "lookback of {} covers ~{} sessions, largest window {} needs {}",
                resolver.lookback(),
                available,
                windows.max_window(),
                needed
            ),
        ));
    }
    Ok(())
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "yahoo".to_string())
        .to_lowercase();
    if !DATA_SOURCES.contains(&source.as_str()) {
        return Err(DashboardError::config_invalid(
            "data",
            "source",
            format!("unknown source {source:?} (expected yahoo or csv)"),
        ));
    }
    if source == "csv" {
        match config.get_string("data", "csv_dir") {
            Some(dir) if !dir.trim().is_empty() => {}
            _ => {
                return Err(DashboardError::ConfigMissing {
                    section: "data".into(),
                    key: "csv_dir".into(),
                });
            }
        }
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    if config.get_string("data", "timeout_secs").is_none() {
        return Ok(());
    }
    let value = config.get_int("data", "timeout_secs", 0);
    if value < 1 {
        return Err(DashboardError::config_invalid(
            "data",
            "timeout_secs",
            "timeout_secs must be a positive whole number",
        ));
    }
    Ok(())
}

fn validate_display(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    if let Some(range) = config.get_string("display", "range") {
        range.parse::<DisplayRange>()?;
    }
    if config.get_string("display", "height").is_some() {
        let height = config.get_int("display", "height", 0);
        if height < MIN_CHART_HEIGHT {
            return Err(DashboardError::config_invalid(
                "display",
                "height",
                format!("height must be a whole number of at least {MIN_CHART_HEIGHT}"),
            ));
        }
    }
    Ok(())
}
