//! Moving-average crossover signals.
//!
//! A point is `Up` when the fast SMA is strictly above the slow SMA and
//! `Down` otherwise, so equal averages count as `Down`. Points where either
//! average is still warming up carry no signal and are dropped.

use super::indicator::simple_moving_average;
use super::price::PriceWindow;

pub const DEFAULT_FAST_PERIOD: usize = 7;
pub const DEFAULT_SLOW_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendState {
    Up,
    Down,
}

/// Moving-average crossover parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MacParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for MacParams {
    fn default() -> Self {
        MacParams {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
        }
    }
}

impl MacParams {
    /// Rows at the start of each window without a defined state.
    pub fn warmup(&self) -> usize {
        self.fast_period.max(self.slow_period).saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalPoint {
    pub price: f64,
    pub fast: f64,
    pub slow: f64,
    pub state: TrendState,
}

pub fn classify(fast: f64, slow: f64) -> TrendState {
    if fast > slow {
        TrendState::Up
    } else {
        TrendState::Down
    }
}

/// Signals for one window. The averages restart at the window start.
pub fn generate_signals(window: &PriceWindow, params: &MacParams) -> Vec<SignalPoint> {
    let prices = window.prices();
    let fast = simple_moving_average(&prices, params.fast_period);
    let slow = simple_moving_average(&prices, params.slow_period);

    prices
        .iter()
        .zip(fast.iter().zip(slow.iter()))
        .filter_map(|(&price, (f, s))| match (f, s) {
            (Some(f), Some(s)) => Some(SignalPoint {
                price,
                fast: *f,
                slow: *s,
                state: classify(*f, *s),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_fast_above_is_up() {
        assert_eq!(classify(1.2, 1.1), TrendState::Up);
    }

    #[test]
    fn classify_fast_below_is_down() {
        assert_eq!(classify(1.0, 1.1), TrendState::Down);
    }

    #[test]
    fn classify_tie_is_down() {
        assert_eq!(classify(1.1, 1.1), TrendState::Down);
    }

    #[test]
    fn default_params() {
        let params = MacParams::default();
        assert_eq!(params.fast_period, 7);
        assert_eq!(params.slow_period, 14);
        assert_eq!(params.warmup(), 13);
    }

    #[test]
    fn warmup_rows_are_dropped() {
        let prices: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let window = PriceWindow::from_prices(0, &prices);
        let signals = generate_signals(&window, &MacParams::default());

        assert_eq!(signals.len(), 20 - 13);
        assert_eq!(signals[0].price, 14.0);
        assert_eq!(signals[0].fast, 11.0);
        assert_eq!(signals[0].slow, 7.5);
    }

    #[test]
    fn signal_points_carry_both_averages() {
        let params = MacParams {
            fast_period: 2,
            slow_period: 3,
        };
        let window = PriceWindow::from_prices(0, &[1.0, 2.0, 3.0, 4.0, 2.0]);
        let signals = generate_signals(&window, &params);

        let averages: Vec<(f64, f64, TrendState)> =
            signals.iter().map(|s| (s.fast, s.slow, s.state)).collect();
        assert_eq!(
            averages,
            vec![
                (2.5, 2.0, TrendState::Up),
                (3.5, 3.0, TrendState::Up),
                (3.0, 3.0, TrendState::Down),
            ]
        );
    }

    #[test]
    fn rising_series_trends_up() {
        let prices: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let window = PriceWindow::from_prices(0, &prices);
        let signals = generate_signals(&window, &MacParams::default());
        assert!(signals.iter().all(|s| s.state == TrendState::Up));
    }

    #[test]
    fn constant_series_trends_down() {
        let window = PriceWindow::from_prices(0, &[1.0; 20]);
        let signals = generate_signals(&window, &MacParams::default());
        assert!(!signals.is_empty());
        assert!(signals.iter().all(|s| s.state == TrendState::Down));
    }

    #[test]
    fn short_window_yields_no_signals() {
        let window = PriceWindow::from_prices(0, &[1.0; 13]);
        assert!(generate_signals(&window, &MacParams::default()).is_empty());
    }
}
