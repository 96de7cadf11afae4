//! Domain error types.

/// Top-level error type for meanrev.
#[derive(Debug, thiserror::Error)]
pub enum MeanrevError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid period: {reason}")]
    PeriodInvalid { reason: String },

    #[error("no price data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient history for {ticker}: have {points} points, scope {scope} requires more")]
    InsufficientHistory {
        ticker: String,
        points: usize,
        scope: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MeanrevError> for std::process::ExitCode {
    fn from(err: &MeanrevError) -> Self {
        let code: u8 = match err {
            MeanrevError::Io(_) => 1,
            MeanrevError::ConfigParse { .. }
            | MeanrevError::ConfigMissing { .. }
            | MeanrevError::ConfigInvalid { .. } => 2,
            MeanrevError::Data { .. } => 3,
            MeanrevError::PeriodInvalid { .. } => 4,
            MeanrevError::NoData { .. } | MeanrevError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
