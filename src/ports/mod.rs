//! Port traits: the seams between the domain and its adapters.

pub mod config_port;
pub mod data_port;
pub mod report_port;
