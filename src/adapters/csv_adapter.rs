//! CSV file data adapter.
//!
//! Expects a header row followed by `timestamp,open,high,low,close,volume`
//! records in chronological order. Timestamps are `YYYY-MM-DD` (read as
//! midnight) or `YYYY-MM-DD HH:MM:SS`.

use crate::domain::bar::Bar;
use crate::domain::error::BacktestError;
use crate::domain::series::BarSeries;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn series_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl DataPort for CsvAdapter {
    fn load_series(&self) -> Result<BarSeries, BacktestError> {
        let content = fs::read_to_string(&self.path).map_err(|e| BacktestError::Data {
            source_name: self.path.display().to_string(),
            reason: format!("failed to read file: {}", e),
        })?;
        let series = parse_series(&self.series_name(), &content)?;
        tracing::info!(file = %self.path.display(), bars = series.len(), "bar data loaded");
        Ok(series)
    }
}

/// Parse CSV text into a series named `name`.
pub fn parse_series(name: &str, content: &str) -> Result<BarSeries, BacktestError> {
    let data_error = |line: usize, reason: String| BacktestError::Data {
        source_name: name.to_string(),
        reason: format!("record {}: {}", line, reason),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut series = BarSeries::new(name);

    for (i, result) in rdr.records().enumerate() {
        let line = i + 1;
        let record = result.map_err(|e| data_error(line, format!("CSV parse error: {}", e)))?;

        let field = |index: usize, column: &str| {
            record
                .get(index)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| data_error(line, format!("missing {} column", column)))
        };
        let price = |index: usize, column: &str| -> Result<f64, BacktestError> {
            let value = field(index, column)?
                .parse::<f64>()
                .map_err(|e| data_error(line, format!("invalid {} value: {}", column, e)))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(data_error(
                    line,
                    format!("invalid {} value: {} is not a positive price", column, value),
                ));
            }
            Ok(value)
        };

        let timestamp = parse_timestamp(field(0, "timestamp")?)
            .ok_or_else(|| data_error(line, "invalid timestamp, expected YYYY-MM-DD[ HH:MM:SS]".into()))?;
        let open = price(1, "open")?;
        let high = price(2, "high")?;
        let low = price(3, "low")?;
        let close = price(4, "close")?;
        let volume: i64 = field(5, "volume")?
            .parse()
            .map_err(|e| data_error(line, format!("invalid volume value: {}", e)))?;

        series.add_bar(Bar::new(timestamp, open, high, low, close, volume))?;
    }

    Ok(series)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
