//! Open positions and closed trades.

use super::profit::Direction;

/// An open position. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub position_size: f64,
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_window: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Fast average crossed back below the slow average.
    Signal,
    /// Still open when the input ran out.
    EndOfData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub position_size: f64,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit: f64,
    pub marginal_return: f64,
    pub entry_window: usize,
    pub exit_window: usize,
    pub exit_reason: ExitReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_fields() {
        let trade = Trade {
            position_size: 100.0,
            direction: Direction::Long,
            entry_price: 1.0,
            exit_price: 1.1,
            profit: 9.99,
            marginal_return: 0.0999,
            entry_window: 1,
            exit_window: 2,
            exit_reason: ExitReason::Signal,
        };
        assert_eq!(trade.direction, Direction::Long);
        assert_eq!(trade.exit_reason, ExitReason::Signal);
        assert_eq!(trade.entry_window, 1);
        assert_eq!(trade.exit_window, 2);
    }
}
