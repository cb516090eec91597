//! Moving-average crossover simulation.
//!
//! Two states, FLAT and LONG, starting FLAT:
//! - FLAT -> LONG when the signal turns `Up` (from `Down` or from no signal).
//!   The whole account balance is committed at the current price.
//! - LONG -> FLAT when the signal turns `Down`, or at the end of the input
//!   (forced exit at the last observed price).
//!
//! The balance and any open position carry across window boundaries. The
//! previous-signal memory does not: averages restart in every window, so the
//! first signal of a window has no predecessor. A position carried into a new
//! window is closed on the first `Down` observation there, and that exit counts
//! as a down crossover.

use tracing::debug;

use super::account::Account;
use super::error::FxBacktestError;
use super::position::{ExitReason, Position, Trade};
use super::price::PriceWindow;
use super::profit::{calculate_profit, pct_change, CostModel, Direction};
use super::signal::{generate_signals, MacParams, TrendState};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub account: Account,
    /// `Up` to `Down` transitions within a window, plus carried positions
    /// closed by the first `Down` of a later window. Every signal exit is one.
    pub down_crossovers: usize,
    /// Whether the last trade was closed because the input ran out.
    pub forced_exit: bool,
}

#[derive(Debug, Clone)]
pub struct StrategySimulator {
    costs: CostModel,
    account: Account,
    position: Option<Position>,
    previous: Option<TrendState>,
    window: usize,
    last_price: Option<f64>,
    down_crossovers: usize,
}

impl StrategySimulator {
    pub fn new(starting_balance: f64, costs: CostModel) -> Self {
        StrategySimulator {
            costs,
            account: Account::new(starting_balance),
            position: None,
            previous: None,
            window: 0,
            last_price: None,
            down_crossovers: 0,
        }
    }

    pub fn balance(&self) -> f64 {
        self.account.balance
    }

    pub fn is_long(&self) -> bool {
        self.position.is_some()
    }

    /// Start a new window. Clears the signal memory, keeps balance and position.
    pub fn begin_window(&mut self, index: usize) {
        self.window = index;
        self.previous = None;
    }

    /// Process one observation.
    pub fn observe(&mut self, price: f64, trend: TrendState) -> Result<(), FxBacktestError> {
        let crossed_up = trend == TrendState::Up && self.previous != Some(TrendState::Up);
        let crossed_down = trend == TrendState::Down
            && match self.previous {
                Some(previous) => previous == TrendState::Up,
                None => self.position.is_some(),
            };
        if crossed_down {
            self.down_crossovers += 1;
        }
        self.previous = Some(trend);
        self.last_price = Some(price);

        match self.position {
            None if crossed_up => self.enter(price),
            Some(_) if trend == TrendState::Down => self.exit(price, ExitReason::Signal)?,
            _ => {}
        }
        Ok(())
    }

    /// Close any open position at the last observed price and return the run state.
    pub fn finish(mut self) -> Result<SimulationResult, FxBacktestError> {
        let mut forced_exit = false;
        if self.is_long() {
            if let Some(price) = self.last_price {
                self.exit(price, ExitReason::EndOfData)?;
                forced_exit = true;
            }
        }

        Ok(SimulationResult {
            account: self.account,
            down_crossovers: self.down_crossovers,
            forced_exit,
        })
    }

    fn enter(&mut self, price: f64) {
        debug!(window = self.window, price, size = self.balance(), "enter long");
        self.position = Some(Position {
            position_size: self.account.balance,
            direction: Direction::Long,
            entry_price: price,
            entry_window: self.window,
        });
    }

    fn exit(&mut self, price: f64, reason: ExitReason) -> Result<(), FxBacktestError> {
        let Some(position) = self.position.take() else {
            return Ok(());
        };

        let profit = calculate_profit(
            position.position_size,
            position.direction,
            position.entry_price,
            price,
            &self.costs,
        )?;
        let (before, after) = self.account.apply_profit(profit);
        let marginal_return = pct_change(before, after)?;

        debug!(
            window = self.window,
            entry = position.entry_price,
            exit = price,
            profit,
            balance = after,
            ?reason,
            "exit long"
        );

        self.account.record_trade(Trade {
            position_size: position.position_size,
            direction: position.direction,
            entry_price: position.entry_price,
            exit_price: price,
            profit,
            marginal_return,
            entry_window: position.entry_window,
            exit_window: self.window,
            exit_reason: reason,
        });
        Ok(())
    }
}

/// Run the crossover strategy over consecutive windows of one pair.
pub fn simulate_windows(
    windows: &[PriceWindow],
    params: &MacParams,
    starting_balance: f64,
    costs: &CostModel,
) -> Result<SimulationResult, FxBacktestError> {
    let mut simulator = StrategySimulator::new(starting_balance, costs.clone());
    for window in windows {
        simulator.begin_window(window.index);
        for signal in generate_signals(window, params) {
            simulator.observe(signal.price, signal.state)?;
        }
    }
    simulator.finish()
}
