//! Configuration validation.
//!
//! Validates all config fields before any run starts.

use crate::domain::account::DEFAULT_STARTING_BALANCE;
use crate::domain::backtest::DEFAULT_WINDOWS;
use crate::domain::error::FxBacktestError;
use crate::domain::profit::{DEFAULT_FIXED_COST_RATE, DEFAULT_SIZE_MULTIPLIER};
use crate::domain::signal::{DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_PAIRS: &str = "AUDUSD,EURGBP,EURUSD,USDCAD";
pub const DEFAULT_THETAS: &str = "0.00013,0.00017,0.00023";
pub const DEFAULT_WINDOW_OVERRIDES: &str = "EURUSD:15";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    validate_starting_balance(config)?;
    validate_cost_rate(config)?;
    validate_size_multiplier(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    let fast = checked_int(config, "strategy", "fast_period", DEFAULT_FAST_PERIOD as i64)?;
    let slow = checked_int(config, "strategy", "slow_period", DEFAULT_SLOW_PERIOD as i64)?;
    if fast < 1 {
        return Err(FxBacktestError::invalid(
            "strategy",
            "fast_period",
            "fast_period must be at least 1",
        ));
    }
    if slow < 1 {
        return Err(FxBacktestError::invalid(
            "strategy",
            "slow_period",
            "slow_period must be at least 1",
        ));
    }
    if fast >= slow {
        return Err(FxBacktestError::invalid(
            "strategy",
            "fast_period",
            "fast_period must be less than slow_period",
        ));
    }
    Ok(())
}

pub fn validate_universe_config(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    for key in ["pairs", "thetas"] {
        if let Some(values) = config.get_list("universe", key) {
            if values.is_empty() {
                return Err(FxBacktestError::invalid(
                    "universe",
                    key,
                    format!("{} must not be empty", key),
                ));
            }
        }
    }

    let windows = checked_int(config, "universe", "windows", DEFAULT_WINDOWS as i64)?;
    if windows < 1 {
        return Err(FxBacktestError::invalid(
            "universe",
            "windows",
            "windows must be at least 1",
        ));
    }

    let overrides = config
        .get_string("universe", "window_overrides")
        .unwrap_or_else(|| DEFAULT_WINDOW_OVERRIDES.to_string());
    parse_window_overrides(&overrides)?;
    Ok(())
}

/// Parse `PAIR:N[,PAIR:N...]` into (upper-cased pair, window count) entries.
pub fn parse_window_overrides(value: &str) -> Result<Vec<(String, usize)>, FxBacktestError> {
    let invalid = |reason: String| FxBacktestError::invalid("universe", "window_overrides", reason);

    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (pair, count) = entry
                .split_once(':')
                .ok_or_else(|| invalid(format!("expected PAIR:N, got {:?}", entry)))?;
            let pair = pair.trim();
            if pair.is_empty() {
                return Err(invalid(format!("missing pair in {:?}", entry)));
            }
            let count: usize = count
                .trim()
                .parse()
                .map_err(|_| invalid(format!("invalid window count in {:?}", entry)))?;
            if count == 0 {
                return Err(invalid(format!("window count must be at least 1 in {:?}", entry)));
            }
            Ok((pair.to_uppercase(), count))
        })
        .collect()
}

/// The configured integer, or `default` when the key is absent. A present
/// value that does not parse is an error, never the default.
fn checked_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, FxBacktestError> {
    match config.get_string(section, key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            FxBacktestError::invalid(section, key, format!("expected an integer, got {:?}", raw))
        }),
        None => Ok(default),
    }
}

fn checked_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, FxBacktestError> {
    match config.get_string(section, key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                FxBacktestError::invalid(section, key, format!("expected a number, got {:?}", raw))
            }),
        None => Ok(default),
    }
}

fn validate_starting_balance(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    let value = checked_double(config, "backtest", "starting_balance", DEFAULT_STARTING_BALANCE)?;
    if value <= 0.0 {
        return Err(FxBacktestError::invalid(
            "backtest",
            "starting_balance",
            "starting_balance must be positive",
        ));
    }
    Ok(())
}

fn validate_cost_rate(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    let value = checked_double(config, "backtest", "fixed_cost_rate", DEFAULT_FIXED_COST_RATE)?;
    if !(0.0..1.0).contains(&value) {
        return Err(FxBacktestError::invalid(
            "backtest",
            "fixed_cost_rate",
            "fixed_cost_rate must be in [0, 1)",
        ));
    }
    Ok(())
}

fn validate_size_multiplier(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    let value = checked_double(config, "backtest", "size_multiplier", DEFAULT_SIZE_MULTIPLIER)?;
    if value <= 0.0 {
        return Err(FxBacktestError::invalid(
            "backtest",
            "size_multiplier",
            "size_multiplier must be positive",
        ));
    }
    Ok(())
}
