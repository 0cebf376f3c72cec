//! Data models: parsed transactions and pipeline configuration.

pub mod config;
pub mod transaction;
