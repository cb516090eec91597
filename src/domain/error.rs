//! Domain error types.

/// Top-level error type for fxbacktest.
#[derive(Debug, thiserror::Error)]
pub enum FxBacktestError {
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {pair} @ {theta}, window {window}")]
    NoData {
        theta: String,
        pair: String,
        window: usize,
    },

    #[error("bad price data in {path}: {reason}")]
    DataFormat { path: String, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FxBacktestError {
    pub(crate) fn division_by_zero(operation: &str) -> Self {
        FxBacktestError::DivisionByZero {
            operation: operation.to_string(),
        }
    }

    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        FxBacktestError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&FxBacktestError> for std::process::ExitCode {
    fn from(err: &FxBacktestError) -> Self {
        let code: u8 = match err {
            FxBacktestError::Io(_) | FxBacktestError::Json(_) => 1,
            FxBacktestError::ConfigParse { .. } | FxBacktestError::ConfigInvalid { .. } => 2,
            FxBacktestError::NoData { .. } | FxBacktestError::DataFormat { .. } => 3,
            FxBacktestError::DivisionByZero { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
