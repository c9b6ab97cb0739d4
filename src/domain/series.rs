//! Append-only bar series.
//!
//! Bars are indexed `0..len()` in the order they were appended. Every appended
//! bar must be stamped strictly later than the previous one; an out-of-order
//! bar is rejected and the series is left untouched.

use crate::domain::bar::Bar;
use crate::domain::error::BacktestError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSeries {
    name: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>) -> Self {
        BarSeries {
            name: name.into(),
            bars: Vec::new(),
        }
    }

    /// Build a series from bars, validating the ordering of every bar.
    pub fn from_bars(
        name: impl Into<String>,
        bars: impl IntoIterator<Item = Bar>,
    ) -> Result<Self, BacktestError> {
        let mut series = BarSeries::new(name);
        for bar in bars {
            series.add_bar(bar)?;
        }
        Ok(series)
    }

    pub fn add_bar(&mut self, bar: Bar) -> Result<(), BacktestError> {
        if let Some(last) = self.bars.last() {
            if bar.timestamp <= last.timestamp {
                return Err(BacktestError::NonIncreasingTimestamp {
                    index: self.bars.len(),
                    previous: last.timestamp,
                    timestamp: bar.timestamp,
                });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn begin_index(&self) -> Option<usize> {
        if self.bars.is_empty() { None } else { Some(0) }
    }

    pub fn end_index(&self) -> Option<usize> {
        self.bars.len().checked_sub(1)
    }

    /// Close price at `index`, NaN when out of range.
    pub fn close_at(&self, index: usize) -> f64 {
        self.bars.get(index).map(|b| b.close).unwrap_or(f64::NAN)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
