//! Price data access port trait.

use crate::domain::error::FxBacktestError;
use crate::domain::price::PriceWindow;

pub trait PriceDataPort {
    /// Load one window of `pair` from the dataset variant `theta`.
    fn load_window(
        &self,
        theta: &str,
        pair: &str,
        window: usize,
    ) -> Result<PriceWindow, FxBacktestError>;

    /// Load windows `0..count` in order, stopping at the first failure.
    fn load_windows(
        &self,
        theta: &str,
        pair: &str,
        count: usize,
    ) -> Result<Vec<PriceWindow>, FxBacktestError> {
        (0..count)
            .map(|window| self.load_window(theta, pair, window))
            .collect()
    }
}
