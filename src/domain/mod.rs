//! Core domain types and logic.

pub mod account;
pub mod backtest;
pub mod buy_and_hold;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod position;
pub mod price;
pub mod profit;
pub mod report;
pub mod signal;
pub mod simulator;
