//! Performance metrics over a run's per-trade marginal returns.
//!
//! Every metric is defined on an empty trade log: it falls back to 0 instead
//! of failing. `PerformanceMetrics::NoTrades` keeps that case distinguishable
//! from a run whose trades really produced zero-valued metrics.

/// Population standard deviation of the returns.
pub fn risk(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let mean = average_return(returns);
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    variance.sqrt()
}

/// Largest peak-to-trough fall of the compounded equity curve.
///
/// The curve starts at 1.0 and is multiplied by (1 + r) for each return;
/// the starting point itself is never measured.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut equity = 1.0_f64;
    let mut peak = equity;
    let mut max_dd = 0.0_f64;

    for r in returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        let dd = (peak - equity) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// total_return / max_drawdown, or total_return itself when there was no drawdown.
pub fn calmar_ratio(total_return: f64, max_drawdown: f64) -> f64 {
    if max_drawdown == 0.0 {
        total_return
    } else {
        total_return / max_drawdown
    }
}

/// Fraction of returns strictly above zero.
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    wins as f64 / returns.len() as f64
}

pub fn average_return(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

pub fn average_positive_return(returns: &[f64]) -> f64 {
    let positive: Vec<f64> = returns.iter().copied().filter(|&r| r > 0.0).collect();
    average_return(&positive)
}

/// Metrics for a run that closed at least one trade. Fractions, not percent.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMetrics {
    pub total_return: f64,
    pub risk: f64,
    pub max_drawdown: f64,
    pub calmar_ratio: f64,
    pub win_rate: f64,
    pub average_return: f64,
    pub average_positive_return: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceMetrics {
    NoTrades { total_return: f64 },
    Traded(TradeMetrics),
}

impl PerformanceMetrics {
    /// `total_return` comes from the start and end balances, not from compounding `returns`.
    pub fn compute(returns: &[f64], total_return: f64) -> Self {
        if returns.is_empty() {
            return PerformanceMetrics::NoTrades { total_return };
        }

        let max_drawdown = max_drawdown(returns);
        PerformanceMetrics::Traded(TradeMetrics {
            total_return,
            risk: risk(returns),
            max_drawdown,
            calmar_ratio: calmar_ratio(total_return, max_drawdown),
            win_rate: win_rate(returns),
            average_return: average_return(returns),
            average_positive_return: average_positive_return(returns),
            trade_count: returns.len(),
        })
    }

    pub fn total_return(&self) -> f64 {
        match self {
            PerformanceMetrics::NoTrades { total_return } => *total_return,
            PerformanceMetrics::Traded(m) => m.total_return,
        }
    }

    pub fn has_trades(&self) -> bool {
        matches!(self, PerformanceMetrics::Traded(_))
    }

    /// Numeric view with the empty-log fallbacks filled in.
    pub fn flatten(&self) -> TradeMetrics {
        match self {
            PerformanceMetrics::Traded(m) => m.clone(),
            PerformanceMetrics::NoTrades { total_return } => TradeMetrics {
                total_return: *total_return,
                risk: 0.0,
                max_drawdown: 0.0,
                calmar_ratio: calmar_ratio(*total_return, 0.0),
                win_rate: 0.0,
                average_return: 0.0,
                average_positive_return: 0.0,
                trade_count: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn risk_is_population_stddev() {
        let returns = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(risk(&returns), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn risk_single_return_is_zero() {
        assert_eq!(risk(&[0.05]), 0.0);
    }

    #[test]
    fn max_drawdown_known_curve() {
        // equity: 1.0, 1.1, 0.55, 0.605
        let dd = max_drawdown(&[0.10, -0.50, 0.10]);
        assert_relative_eq!(dd, (1.1 - 0.55) / 1.1, epsilon = 1e-12);
        assert_relative_eq!(dd, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_measures_from_initial_peak() {
        assert_relative_eq!(max_drawdown(&[-0.2]), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_recovery_keeps_worst() {
        // equity: 1.0, 0.9, 1.08, 0.756, 1.5
        let dd = max_drawdown(&[-0.1, 0.2, -0.3, 1.0]);
        assert_relative_eq!(dd, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_empty_is_zero() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn calmar_uses_drawdown() {
        assert_relative_eq!(calmar_ratio(0.2, 0.1), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn calmar_without_drawdown_is_total_return() {
        assert_eq!(calmar_ratio(0.2, 0.0), 0.2);
        let returns = [0.05, 0.1, 0.0];
        assert_eq!(calmar_ratio(0.2, max_drawdown(&returns)), 0.2);
    }

    #[test]
    fn win_rate_half() {
        assert_eq!(win_rate(&[0.01, -0.02, 0.03, -0.01]), 0.5);
    }

    #[test]
    fn win_rate_zero_return_is_not_a_win() {
        assert_eq!(win_rate(&[0.0, 0.01]), 0.5);
    }

    #[test]
    fn averages() {
        let returns = [0.01, -0.02, 0.03, -0.01];
        assert_relative_eq!(average_return(&returns), 0.0025, epsilon = 1e-12);
        assert_relative_eq!(average_positive_return(&returns), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn average_positive_without_winners_is_zero() {
        assert_eq!(average_positive_return(&[-0.01, -0.02]), 0.0);
    }

    #[test]
    fn empty_returns_fall_back_to_zero() {
        assert_eq!(risk(&[]), 0.0);
        assert_eq!(win_rate(&[]), 0.0);
        assert_eq!(average_return(&[]), 0.0);
        assert_eq!(average_positive_return(&[]), 0.0);
    }

    #[test]
    fn compute_no_trades_variant() {
        let metrics = PerformanceMetrics::compute(&[], 0.0);
        assert!(!metrics.has_trades());
        assert_eq!(metrics, PerformanceMetrics::NoTrades { total_return: 0.0 });

        let flat = metrics.flatten();
        assert_eq!(flat.trade_count, 0);
        assert_eq!(flat.max_drawdown, 0.0);
        assert_eq!(flat.calmar_ratio, 0.0);
    }

    #[test]
    fn compute_traded() {
        let returns = [0.10, -0.50, 0.10];
        let metrics = PerformanceMetrics::compute(&returns, -0.395);
        let PerformanceMetrics::Traded(m) = metrics else {
            panic!("expected traded metrics");
        };

        assert_eq!(m.trade_count, 3);
        assert_relative_eq!(m.max_drawdown, 0.5, epsilon = 1e-12);
        assert_relative_eq!(m.calmar_ratio, -0.79, epsilon = 1e-9);
        assert_relative_eq!(m.win_rate, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.average_positive_return, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn total_return_is_not_rederived() {
        let metrics = PerformanceMetrics::compute(&[0.1], 0.5);
        assert_eq!(metrics.total_return(), 0.5);
    }

    proptest! {
        #[test]
        fn non_negative_returns_have_no_drawdown(returns in prop::collection::vec(0.0f64..1.0, 0..50)) {
            prop_assert_eq!(max_drawdown(&returns), 0.0);
        }

        #[test]
        fn drawdown_is_a_fraction(returns in prop::collection::vec(-0.99f64..1.0, 0..50)) {
            let dd = max_drawdown(&returns);
            prop_assert!((0.0..=1.0).contains(&dd));
        }

        #[test]
        fn win_rate_is_a_fraction(returns in prop::collection::vec(-1.0f64..1.0, 0..50)) {
            let rate = win_rate(&returns);
            prop_assert!((0.0..=1.0).contains(&rate));
        }
    }
}
