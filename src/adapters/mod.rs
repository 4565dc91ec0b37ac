//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod html_dashboard_adapter;
#[cfg(feature = "web")]
pub mod web;
pub mod yahoo_adapter;
