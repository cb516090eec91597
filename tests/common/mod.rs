#![allow(dead_code)]

use fxbacktest::domain::backtest::{BacktestConfig, Universe};
use fxbacktest::domain::error::FxBacktestError;
pub use fxbacktest::domain::price::PriceWindow;
use fxbacktest::domain::report::{BuyAndHoldReport, MacReport};
use fxbacktest::ports::data_port::PriceDataPort;
use fxbacktest::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::collections::HashMap;

type WindowKey = (String, String, usize);

pub struct MockPriceData {
    pub windows: HashMap<WindowKey, PriceWindow>,
    pub loads: RefCell<Vec<WindowKey>>,
}

impl MockPriceData {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            loads: RefCell::new(Vec::new()),
        }
    }

    pub fn with_window(mut self, theta: &str, pair: &str, index: usize, prices: &[f64]) -> Self {
        self.windows.insert(
            (theta.to_string(), pair.to_string(), index),
            PriceWindow::from_prices(index, prices),
        );
        self
    }

    /// The same prices in windows `0..count`.
    pub fn with_windows(mut self, theta: &str, pair: &str, count: usize, prices: &[f64]) -> Self {
        for index in 0..count {
            self = self.with_window(theta, pair, index, prices);
        }
        self
    }
}

impl PriceDataPort for MockPriceData {
    fn load_window(
        &self,
        theta: &str,
        pair: &str,
        window: usize,
    ) -> Result<PriceWindow, FxBacktestError> {
        let key = (theta.to_string(), pair.to_string(), window);
        self.loads.borrow_mut().push(key.clone());
        self.windows
            .get(&key)
            .cloned()
            .ok_or_else(|| FxBacktestError::NoData {
                theta: theta.to_string(),
                pair: pair.to_string(),
                window,
            })
    }
}

#[derive(Default)]
pub struct RecordingReports {
    pub mac: RefCell<Vec<(String, String, MacReport)>>,
    pub buy_and_hold: RefCell<Vec<(String, BuyAndHoldReport)>>,
}

impl ReportPort for RecordingReports {
    fn write_mac(
        &self,
        theta: &str,
        pair: &str,
        report: &MacReport,
    ) -> Result<(), FxBacktestError> {
        self.mac
            .borrow_mut()
            .push((theta.to_string(), pair.to_string(), report.clone()));
        Ok(())
    }

    fn write_buy_and_hold(
        &self,
        pair: &str,
        report: &BuyAndHoldReport,
    ) -> Result<(), FxBacktestError> {
        self.buy_and_hold
            .borrow_mut()
            .push((pair.to_string(), report.clone()));
        Ok(())
    }
}

/// 14 flat prices, a rally, then a slide. With SMA(7)/SMA(14) the signal
/// turns up at 1.01 and back down at 0.98.
pub fn crossover_prices() -> Vec<f64> {
    let mut prices = vec![1.0; 14];
    prices.extend([
        1.01, 1.02, 1.03, 1.04, 1.05, 1.04, 1.03, 1.02, 1.01, 1.0, 0.99, 0.98, 0.97, 0.96, 0.95,
    ]);
    prices
}

/// 14 flat prices then a steady rise: the signal turns up and never turns down.
pub fn rising_prices() -> Vec<f64> {
    let mut prices = vec![1.0; 14];
    prices.extend((1..=10).map(|i| 1.0 + i as f64 * 0.01));
    prices
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig::default()
}

pub fn sample_universe(pairs: &[&str], thetas: &[&str]) -> Universe {
    Universe {
        pairs: pairs.iter().map(|p| p.to_string()).collect(),
        thetas: thetas.iter().map(|t| t.to_string()).collect(),
        default_windows: 2,
        window_overrides: HashMap::new(),
        benchmark_theta: thetas[0].to_string(),
    }
}
