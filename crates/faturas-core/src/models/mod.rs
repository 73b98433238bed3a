//! Data models: amounts, receipt records and configuration.

pub mod amount;
pub mod config;
pub mod receipt;
