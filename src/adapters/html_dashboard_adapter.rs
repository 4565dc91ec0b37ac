//! HTML dashboard adapter implementing DashboardPort.
//!
//! Renders metric cards and an inline SVG chart with Askama. The same page
//! template backs the web server, which additionally shows the query form.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::adapters::chart_svg::{self, DEFAULT_CHART_HEIGHT};
use crate::domain::dashboard::DashboardView;
use crate::domain::display::DisplayRange;
use crate::domain::error::DashboardError;
use crate::domain::trend::{TrendReading, TrendState};
use crate::ports::report_port::DashboardPort;

pub struct RangeOption {
    pub value: usize,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub show_form: bool,
    pub query_symbol: String,
    pub ranges: Vec<RangeOption>,
    pub error: Option<String>,
    pub has_view: bool,
    pub ticker: String,
    pub last_price: String,
    pub indicator_label: String,
    pub indicator_value: String,
    pub trend: String,
    pub trend_class: &'static str,
    pub chart_svg: String,
    pub shown: usize,
    pub history_len: usize,
}

impl DashboardPage {
    pub fn from_view(view: &DashboardView, height: u32) -> Self {
        let indicator_label = view.indicator_label();
        let chart_svg = chart_svg::generate_trend_svg(
            view.display_prices.points(),
            &view.display_indicator.values,
            &indicator_label,
            height,
        );
        let trend = match view.trend {
            TrendReading::Undetermined {
                required,
                available,
            } => format!("Undetermined ({available} of {required} sessions)"),
            reading => reading.to_string(),
        };
        Self {
            show_form: false,
            query_symbol: view.symbol.to_string(),
            ranges: range_options(view.display_range),
            error: None,
            has_view: true,
            ticker: view.resolved_ticker.to_string(),
            last_price: format!("{:.2}", view.last_price),
            indicator_label,
            indicator_value: view
                .last_indicator_value
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "n/a".to_string()),
            trend,
            trend_class: trend_class(&view.trend),
            chart_svg,
            shown: view.display_prices.len(),
            history_len: view.history_len,
        }
    }

    /// Page with only the form, optionally carrying an error message.
    pub fn form_only(query_symbol: &str, range: DisplayRange, error: Option<String>) -> Self {
        Self {
            show_form: true,
            query_symbol: query_symbol.to_string(),
            ranges: range_options(range),
            error,
            has_view: false,
            ticker: String::new(),
            last_price: String::new(),
            indicator_label: String::new(),
            indicator_value: String::new(),
            trend: String::new(),
            trend_class: "undetermined",
            chart_svg: String::new(),
            shown: 0,
            history_len: 0,
        }
    }

    pub fn with_form(mut self) -> Self {
        self.show_form = true;
        self
    }
}

fn range_options(selected: DisplayRange) -> Vec<RangeOption> {
    DisplayRange::all()
        .into_iter()
        .map(|r| RangeOption {
            value: r.count(),
            selected: r == selected,
        })
        .collect()
}

fn trend_class(reading: &TrendReading) -> &'static str {
    match reading.state() {
        Some(TrendState::Bullish) => "bullish",
        Some(TrendState::Bearish) => "bearish",
        None => "undetermined",
    }
}

pub struct HtmlDashboardAdapter {
    chart_height: u32,
}

impl HtmlDashboardAdapter {
    pub fn new(chart_height: u32) -> Self {
        Self { chart_height }
    }
}

impl Default for HtmlDashboardAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_HEIGHT)
    }
}

impl DashboardPort for HtmlDashboardAdapter {
    fn render(&self, view: &DashboardView, output_path: &str) -> Result<(), DashboardError> {
        let html = DashboardPage::from_view(view, self.chart_height)
            .render()
            .map_err(|e| DashboardError::Io(std::io::Error::other(e.to_string())))?;

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        log::info!("wrote dashboard for {} to {}", view.resolved_ticker, path.display());

        Ok(())
    }
}
