//! Account balance and trade log for one run.

use super::error::FxBacktestError;
use super::position::Trade;
use super::profit::pct_change;

pub const DEFAULT_STARTING_BALANCE: f64 = 100.0;

/// Running balance carried across every window of a run.
///
/// The balance may go negative; there is no margin-call logic.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub starting_balance: f64,
    pub balance: f64,
    pub trades: Vec<Trade>,
}

impl Account {
    pub fn new(starting_balance: f64) -> Self {
        Account {
            starting_balance,
            balance: starting_balance,
            trades: Vec::new(),
        }
    }

    /// Add a realized profit and return (before, after) balances.
    pub fn apply_profit(&mut self, profit: f64) -> (f64, f64) {
        let before = self.balance;
        self.balance += profit;
        (before, self.balance)
    }

    pub fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn marginal_returns(&self) -> Vec<f64> {
        self.trades.iter().map(|t| t.marginal_return).collect()
    }

    pub fn total_return(&self) -> Result<f64, FxBacktestError> {
        pct_change(self.starting_balance, self.balance)
    }
}
