//! Serializable result reports.
//!
//! Percentage fields are the internal fractions scaled by 100. The Calmar
//! ratio is written unscaled.

use serde::{Deserialize, Serialize};

use super::metrics::PerformanceMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacReport {
    #[serde(rename = "Return (%)")]
    pub return_pct: f64,
    #[serde(rename = "Risk (%)")]
    pub risk_pct: f64,
    #[serde(rename = "Maximum Drawdown (%)")]
    pub max_drawdown_pct: f64,
    #[serde(rename = "Calmar Ratio")]
    pub calmar_ratio: f64,
    #[serde(rename = "Win Rate (%)")]
    pub win_rate_pct: f64,
    #[serde(rename = "Average Return (%)")]
    pub average_return_pct: f64,
    #[serde(rename = "Ave. Positive Returns (%)")]
    pub average_positive_return_pct: f64,
}

impl MacReport {
    pub fn from_metrics(metrics: &PerformanceMetrics) -> Self {
        let m = metrics.flatten();
        MacReport {
            return_pct: m.total_return * 100.0,
            risk_pct: m.risk * 100.0,
            max_drawdown_pct: m.max_drawdown * 100.0,
            calmar_ratio: m.calmar_ratio,
            win_rate_pct: m.win_rate * 100.0,
            average_return_pct: m.average_return * 100.0,
            average_positive_return_pct: m.average_positive_return * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyAndHoldReport {
    #[serde(rename = "Return (%)")]
    pub return_pct: f64,
}

impl BuyAndHoldReport {
    pub fn from_total_return(total_return: f64) -> Self {
        BuyAndHoldReport {
            return_pct: total_return * 100.0,
        }
    }
}
