//! Trade profit and relative change.
//!
//! profit = (exit - entry) / entry * size * sign - cost_rate * size
//! where size = position_size * size_multiplier.

use super::error::FxBacktestError;

pub const DEFAULT_FIXED_COST_RATE: f64 = 0.0001;
pub const DEFAULT_SIZE_MULTIPLIER: f64 = 1.0;

/// Trade direction. `None` means no trade was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
    None,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
            Direction::None => 0.0,
        }
    }
}

/// Fixed transaction-cost model applied to every closed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    pub fixed_cost_rate: f64,
    pub size_multiplier: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            fixed_cost_rate: DEFAULT_FIXED_COST_RATE,
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
        }
    }
}

/// Profit of a single trade after the fixed transaction cost.
///
/// `Direction::None` short-circuits to zero without charging the cost.
/// A zero `entry_price` is corrupt input and is returned as an error.
pub fn calculate_profit(
    position_size: f64,
    direction: Direction,
    entry_price: f64,
    exit_price: f64,
    costs: &CostModel,
) -> Result<f64, FxBacktestError> {
    if direction == Direction::None {
        return Ok(0.0);
    }
    if entry_price == 0.0 {
        return Err(FxBacktestError::division_by_zero("calculate_profit"));
    }

    let size = position_size * costs.size_multiplier;
    let transaction_cost = costs.fixed_cost_rate * size;
    let relative_move = (exit_price - entry_price) / entry_price;

    Ok(relative_move * size * direction.sign() - transaction_cost)
}

/// (new - old) / old
pub fn pct_change(old_value: f64, new_value: f64) -> Result<f64, FxBacktestError> {
    if old_value == 0.0 {
        return Err(FxBacktestError::division_by_zero("pct_change"));
    }
    Ok((new_value - old_value) / old_value)
}
