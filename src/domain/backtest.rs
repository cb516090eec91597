//! Run orchestration.
//!
//! A run is one pair under one dataset variant (θ). Runs share no state: each
//! loads its own windows, simulates, and hands back its result. The batch
//! functions walk the (pair, θ) grid and keep going when a run fails.

use std::collections::HashMap;

use tracing::{error, info, warn};

use super::account::DEFAULT_STARTING_BALANCE;
use super::buy_and_hold::{self, BuyAndHoldResult};
use super::error::FxBacktestError;
use super::metrics::PerformanceMetrics;
use super::profit::CostModel;
use super::report::{BuyAndHoldReport, MacReport};
use super::signal::MacParams;
use super::simulator::{simulate_windows, SimulationResult};
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_WINDOWS: usize = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub starting_balance: f64,
    pub costs: CostModel,
    pub params: MacParams,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            starting_balance: DEFAULT_STARTING_BALANCE,
            costs: CostModel::default(),
            params: MacParams::default(),
        }
    }
}

/// Pairs, dataset variants and window counts to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    pub pairs: Vec<String>,
    pub thetas: Vec<String>,
    pub default_windows: usize,
    pub window_overrides: HashMap<String, usize>,
    /// Dataset variant used for the buy-and-hold benchmark.
    pub benchmark_theta: String,
}

impl Universe {
    pub fn window_count(&self, pair: &str) -> usize {
        self.window_overrides
            .get(pair)
            .copied()
            .unwrap_or(self.default_windows)
    }

    /// Restrict to a single pair and/or θ.
    pub fn filtered(mut self, pair: Option<&str>, theta: Option<&str>) -> Self {
        if let Some(pair) = pair {
            self.pairs = vec![pair.to_uppercase()];
        }
        if let Some(theta) = theta {
            self.thetas = vec![theta.to_string()];
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct MacRun {
    pub pair: String,
    pub theta: String,
    pub simulation: SimulationResult,
    pub metrics: PerformanceMetrics,
    pub report: MacReport,
}

impl MacRun {
    pub fn final_balance(&self) -> f64 {
        self.simulation.account.balance
    }
}

#[derive(Debug, Clone)]
pub struct BuyAndHoldRun {
    pub pair: String,
    pub result: BuyAndHoldResult,
    pub report: BuyAndHoldReport,
}

#[derive(Debug)]
pub struct RunFailure {
    pub pair: String,
    pub theta: Option<String>,
    pub error: FxBacktestError,
}

/// Outcomes collected across a batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub mac_runs: Vec<MacRun>,
    pub buy_and_hold_runs: Vec<BuyAndHoldRun>,
    pub failures: Vec<RunFailure>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.mac_runs.len() + self.buy_and_hold_runs.len()
    }

    pub fn all_failed(&self) -> bool {
        self.succeeded() == 0 && !self.failures.is_empty()
    }
}

/// Crossover strategy over windows `0..windows` of one pair.
pub fn run_mac(
    data_port: &dyn PriceDataPort,
    pair: &str,
    theta: &str,
    windows: usize,
    config: &BacktestConfig,
) -> Result<MacRun, FxBacktestError> {
    let price_windows = data_port.load_windows(theta, pair, windows)?;
    let simulation = simulate_windows(
        &price_windows,
        &config.params,
        config.starting_balance,
        &config.costs,
    )?;

    let total_return = simulation.account.total_return()?;
    let metrics = PerformanceMetrics::compute(&simulation.account.marginal_returns(), total_return);
    let report = MacReport::from_metrics(&metrics);

    Ok(MacRun {
        pair: pair.to_string(),
        theta: theta.to_string(),
        simulation,
        metrics,
        report,
    })
}

/// Buy at the first price of window 0, sell at the last price of window `windows - 1`.
pub fn run_buy_and_hold(
    data_port: &dyn PriceDataPort,
    pair: &str,
    theta: &str,
    windows: usize,
    config: &BacktestConfig,
) -> Result<BuyAndHoldRun, FxBacktestError> {
    let last_index = windows.saturating_sub(1);
    let first = data_port.load_window(theta, pair, 0)?;
    let last = if last_index == 0 {
        first.clone()
    } else {
        data_port.load_window(theta, pair, last_index)?
    };

    let no_data = |window: usize| FxBacktestError::NoData {
        theta: theta.to_string(),
        pair: pair.to_string(),
        window,
    };
    if first.is_empty() {
        return Err(no_data(0));
    }
    let result = buy_and_hold::evaluate(&first, &last, config.starting_balance, &config.costs)?
        .ok_or_else(|| no_data(last_index))?;
    let report = BuyAndHoldReport::from_total_return(result.total_return);

    Ok(BuyAndHoldRun {
        pair: pair.to_string(),
        result,
        report,
    })
}

pub fn run_mac_batch(
    data_port: &dyn PriceDataPort,
    report_port: &dyn ReportPort,
    universe: &Universe,
    config: &BacktestConfig,
    summary: &mut BatchSummary,
) {
    for pair in &universe.pairs {
        for theta in &universe.thetas {
            let windows = universe.window_count(pair);
            info!(%pair, %theta, windows, "running MAC backtest");

            let outcome = run_mac(data_port, pair, theta, windows, config).and_then(|run| {
                report_port.write_mac(theta, pair, &run.report)?;
                Ok(run)
            });

            match outcome {
                Ok(run) => {
                    if !run.metrics.has_trades() {
                        warn!(%pair, %theta, "no trades; report metrics are zero placeholders");
                    }
                    info!(
                        %pair,
                        %theta,
                        trades = run.simulation.account.trades.len(),
                        total_return = run.metrics.total_return(),
                        final_balance = run.final_balance(),
                        "MAC backtest complete"
                    );
                    summary.mac_runs.push(run);
                }
                Err(e) => {
                    error!(%pair, %theta, error = %e, "MAC backtest failed");
                    summary.failures.push(RunFailure {
                        pair: pair.clone(),
                        theta: Some(theta.clone()),
                        error: e,
                    });
                }
            }
        }
    }
}

pub fn run_buy_and_hold_batch(
    data_port: &dyn PriceDataPort,
    report_port: &dyn ReportPort,
    universe: &Universe,
    config: &BacktestConfig,
    summary: &mut BatchSummary,
) {
    let theta = &universe.benchmark_theta;
    for pair in &universe.pairs {
        let windows = universe.window_count(pair);
        info!(%pair, %theta, windows, "running buy-and-hold benchmark");

        let outcome =
            run_buy_and_hold(data_port, pair, theta, windows, config).and_then(|run| {
                report_port.write_buy_and_hold(pair, &run.report)?;
                Ok(run)
            });

        match outcome {
            Ok(run) => {
                info!(%pair, total_return = run.result.total_return, "buy-and-hold complete");
                summary.buy_and_hold_runs.push(run);
            }
            Err(e) => {
                error!(%pair, error = %e, "buy-and-hold failed");
                summary.failures.push(RunFailure {
                    pair: pair.clone(),
                    theta: None,
                    error: e,
                });
            }
        }
    }
}
