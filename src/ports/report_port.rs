//! Report output port trait.

use crate::domain::error::FxBacktestError;
use crate::domain::report::{BuyAndHoldReport, MacReport};

/// Port for persisting per-run reports.
pub trait ReportPort {
    fn write_mac(&self, theta: &str, pair: &str, report: &MacReport)
        -> Result<(), FxBacktestError>;

    fn write_buy_and_hold(
        &self,
        pair: &str,
        report: &BuyAndHoldReport,
    ) -> Result<(), FxBacktestError>;
}
