//! Report generation port trait.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::BacktestError;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), BacktestError>;
}
