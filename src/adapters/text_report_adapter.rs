//! Plain-text report adapter.
//!
//! Prints every strategy's trade record followed by one block per criterion:
//!
//! ```text
//! -- TotalProfit --
//! <value for the first strategy>
//! <value for the second strategy>
//!
//! ```

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::BacktestError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), BacktestError> {
        for run in &result.runs {
            writeln!(out, "{}", run.strategy_name)?;
            write!(out, "{}", run.record)?;
            writeln!(out)?;
        }
        for row in &result.criteria {
            writeln!(out, "-- {} --", row.name)?;
            for value in &row.values {
                writeln!(out, "{}", value)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}
