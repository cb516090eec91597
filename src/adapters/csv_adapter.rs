//! CSV price window adapter.
//!
//! Layout: `<base>/<theta>/<PAIR>/Window_<n>/test.csv`, one header row, a
//! price column (default `DCC`) and an optional `timestamp` column.

use crate::domain::error::FxBacktestError;
use crate::domain::price::{PricePoint, PriceWindow};
use crate::ports::data_port::PriceDataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PRICE_COLUMN: &str = "DCC";
const TIMESTAMP_COLUMN: &str = "timestamp";

pub struct CsvAdapter {
    base_path: PathBuf,
    price_column: String,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
        }
    }

    pub fn with_price_column(mut self, column: &str) -> Self {
        self.price_column = column.to_string();
        self
    }

    pub fn window_path(&self, theta: &str, pair: &str, window: usize) -> PathBuf {
        self.base_path
            .join(theta)
            .join(pair)
            .join(format!("Window_{}", window))
            .join("test.csv")
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl PriceDataPort for CsvAdapter {
    fn load_window(
        &self,
        theta: &str,
        pair: &str,
        window: usize,
    ) -> Result<PriceWindow, FxBacktestError> {
        let path = self.window_path(theta, pair, window);
        let content = fs::read_to_string(&path).map_err(|_| FxBacktestError::NoData {
            theta: theta.to_string(),
            pair: pair.to_string(),
            window,
        })?;
        let data_error = |reason: String| FxBacktestError::DataFormat {
            path: path.display().to_string(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| data_error(format!("CSV header error: {}", e)))?
            .clone();

        let price_idx = headers
            .iter()
            .position(|h| h.trim() == self.price_column)
            .ok_or_else(|| data_error(format!("missing {} column", self.price_column)))?;
        let timestamp_idx = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(TIMESTAMP_COLUMN));

        let mut points: Vec<PricePoint> = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;

            let price: f64 = record
                .get(price_idx)
                .ok_or_else(|| data_error(format!("row {}: missing price", row)))?
                .trim()
                .parse()
                .map_err(|e| data_error(format!("row {}: invalid price: {}", row, e)))?;
            if !price.is_finite() {
                return Err(data_error(format!("row {}: price is not finite", row)));
            }

            let timestamp = match timestamp_idx.and_then(|i| record.get(i)) {
                Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                    data_error(format!("row {}: invalid timestamp {:?}", row, raw))
                })?),
                None => None,
            };

            let previous = points.last().and_then(|p| p.timestamp);
            if let (Some(ts), Some(prev)) = (timestamp, previous) {
                if ts <= prev {
                    return Err(data_error(format!(
                        "row {}: timestamp {} is not after {}",
                        row, ts, prev
                    )));
                }
            }

            points.push(PricePoint { timestamp, price });
        }

        Ok(PriceWindow::new(window, points))
    }
}
