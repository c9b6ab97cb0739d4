//! Domain error types.

use chrono::NaiveDateTime;

/// A parse error with position information for rule parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Format the error with a caret pointing at the error position in the input.
    ///
    /// `position` is a byte offset; the caret is placed by character column.
    pub fn display_with_context(&self, input: &str) -> String {
        let column = input
            .char_indices()
            .take_while(|(offset, _)| *offset < self.position)
            .count();
        let caret = " ".repeat(column) + "^";
        format!("{input}\n{caret}\n{err}", err = self)
    }
}

/// Top-level error type for smabacktest.
#[derive(Debug, thiserror::Error)]
pub enum BacktestError {
    #[error(
        "bar {index} has timestamp {timestamp}, which is not after the previous bar ({previous})"
    )]
    NonIncreasingTimestamp {
        index: usize,
        previous: NaiveDateTime,
        timestamp: NaiveDateTime,
    },

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

    #[error(transparent)]
    RuleParse(#[from] ParseError),

    #[error("data error in {source_name}: {reason}")]
    Data { source_name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BacktestError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BacktestError::Io(_) => 1,
            BacktestError::ConfigParse { .. }
            | BacktestError::ConfigMissing { .. }
            | BacktestError::ConfigInvalid { .. } => 2,
            BacktestError::Data { .. } => 3,
            BacktestError::RuleParse(_) => 4,
            BacktestError::NonIncreasingTimestamp { .. } => 5,
        }
    }
}

impl From<&BacktestError> for std::process::ExitCode {
    fn from(err: &BacktestError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
