#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use smabacktest::domain::bar::Bar;
use smabacktest::domain::error::BacktestError;
use smabacktest::domain::series::BarSeries;
use smabacktest::ports::data_port::DataPort;
use std::cell::Cell;
use std::io::Write;

pub const FIXTURE_CLOSES: [f64; 8] = [100.0, 110.0, 140.0, 119.0, 100.0, 110.0, 120.0, 130.0];

pub fn day(n: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        + Duration::days(n)
}

pub fn make_series(name: &str, closes: &[f64]) -> BarSeries {
    BarSeries::from_bars(
        name,
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::flat(day(i as i64), c, 1000 + i as i64)),
    )
    .unwrap()
}

pub fn fixture_series() -> BarSeries {
    make_series("fixture", &FIXTURE_CLOSES)
}

/// Data port returning a fixed series or a fixed error, counting loads.
pub struct MockDataPort {
    pub series: Option<BarSeries>,
    pub error: Option<String>,
    pub loads: Cell<usize>,
}

impl MockDataPort {
    pub fn with_series(series: BarSeries) -> Self {
        Self {
            series: Some(series),
            error: None,
            loads: Cell::new(0),
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            series: None,
            error: Some(reason.to_string()),
            loads: Cell::new(0),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self) -> Result<BarSeries, BacktestError> {
        self.loads.set(self.loads.get() + 1);
        if let Some(reason) = &self.error {
            return Err(BacktestError::Data {
                source_name: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.series.clone().unwrap_or_default())
    }
}

pub fn write_temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn fixture_csv() -> String {
    let mut csv = String::from("timestamp,open,high,low,close,volume\n");
    for (i, close) in FIXTURE_CLOSES.iter().enumerate() {
        csv.push_str(&format!(
            "2018-01-{:02} 12:00:00,{c},{c},{c},{c},{}\n",
            i + 1,
            1060 + 10 * i,
            c = close
        ));
    }
    csv
}
