//! JSON report file adapter.
//!
//! MAC reports go to `<base>/DC_MAC/<theta>/<PAIR>.json`, buy-and-hold reports
//! to `<base>/BH/<PAIR>.json`. Output uses four-space indentation.

use crate::domain::error::FxBacktestError;
use crate::domain::report::{BuyAndHoldReport, MacReport};
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

pub struct JsonReportAdapter {
    base_path: PathBuf,
}

impl JsonReportAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn mac_path(&self, theta: &str, pair: &str) -> PathBuf {
        self.base_path
            .join("DC_MAC")
            .join(theta)
            .join(format!("{}.json", pair))
    }

    pub fn buy_and_hold_path(&self, pair: &str) -> PathBuf {
        self.base_path.join("BH").join(format!("{}.json", pair))
    }
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, FxBacktestError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| FxBacktestError::Io(std::io::Error::other(e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FxBacktestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_pretty_json(value)?)?;
    Ok(())
}

impl ReportPort for JsonReportAdapter {
    fn write_mac(
        &self,
        theta: &str,
        pair: &str,
        report: &MacReport,
    ) -> Result<(), FxBacktestError> {
        write_json(&self.mac_path(theta, pair), report)
    }

    fn write_buy_and_hold(
        &self,
        pair: &str,
        report: &BuyAndHoldReport,
    ) -> Result<(), FxBacktestError> {
        write_json(&self.buy_and_hold_path(pair), report)
    }
}
