//! Port traits at the I/O seams: price data, configuration, reports.

pub mod config_port;
pub mod data_port;
pub mod report_port;
