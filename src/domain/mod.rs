//! Core domain types and logic.

pub mod symbol;
pub mod price_series;
pub mod indicator;
pub mod trend;
pub mod window_config;
pub mod resolver;
pub mod display;
pub mod dashboard;
pub mod config_validation;
pub mod error;
