//! Buy-and-hold benchmark: one long trade over the whole horizon.

use super::error::FxBacktestError;
use super::price::PriceWindow;
use super::profit::{calculate_profit, pct_change, CostModel, Direction};

#[derive(Debug, Clone, PartialEq)]
pub struct BuyAndHoldResult {
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit: f64,
    pub final_balance: f64,
    pub total_return: f64,
}

/// Enter at the first price of `first`, exit at the last price of `last`.
///
/// Returns `None` when either window has no prices.
pub fn evaluate(
    first: &PriceWindow,
    last: &PriceWindow,
    starting_balance: f64,
    costs: &CostModel,
) -> Result<Option<BuyAndHoldResult>, FxBacktestError> {
    let (Some(entry_price), Some(exit_price)) = (first.first_price(), last.last_price()) else {
        return Ok(None);
    };

    let profit = calculate_profit(starting_balance, Direction::Long, entry_price, exit_price, costs)?;
    let final_balance = starting_balance + profit;
    let total_return = pct_change(starting_balance, final_balance)?;

    Ok(Some(BuyAndHoldResult {
        entry_price,
        exit_price,
        profit,
        final_balance,
        total_return,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uses_first_and_last_prices() {
        let first = PriceWindow::from_prices(0, &[1.0, 5.0, 0.5]);
        let last = PriceWindow::from_prices(17, &[3.0, 0.2, 1.2]);
        let result = evaluate(&first, &last, 100.0, &CostModel::default())
            .unwrap()
            .unwrap();

        assert_eq!(result.entry_price, 1.0);
        assert_eq!(result.exit_price, 1.2);
        assert_relative_eq!(result.profit, 20.0 - 0.01, epsilon = 1e-9);
        assert_relative_eq!(result.total_return, 0.1999, epsilon = 1e-9);
    }

    #[test]
    fn single_window_horizon() {
        let window = PriceWindow::from_prices(0, &[2.0, 1.0]);
        let result = evaluate(&window, &window, 100.0, &CostModel::default())
            .unwrap()
            .unwrap();
        assert_relative_eq!(result.total_return, -0.5001, epsilon = 1e-9);
    }

    #[test]
    fn flat_prices_cost_the_fee() {
        let window = PriceWindow::from_prices(0, &[1.5, 1.5]);
        let result = evaluate(&window, &window, 100.0, &CostModel::default())
            .unwrap()
            .unwrap();
        assert_relative_eq!(result.final_balance, 99.99, epsilon = 1e-9);
    }

    #[test]
    fn empty_window_has_no_result() {
        let empty = PriceWindow::new(0, vec![]);
        let full = PriceWindow::from_prices(1, &[1.0]);
        assert!(evaluate(&empty, &full, 100.0, &CostModel::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn zero_entry_price_is_an_error() {
        let window = PriceWindow::from_prices(0, &[0.0, 1.0]);
        assert!(evaluate(&window, &window, 100.0, &CostModel::default()).is_err());
    }
}
