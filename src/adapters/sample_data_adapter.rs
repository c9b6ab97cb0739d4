//! Data adapter serving the built-in sample series.

use crate::domain::demo::sample_series;
use crate::domain::error::BacktestError;
use crate::domain::series::BarSeries;
use crate::ports::data_port::DataPort;

#[derive(Debug, Default)]
pub struct SampleDataAdapter;

impl DataPort for SampleDataAdapter {
    fn load_series(&self) -> Result<BarSeries, BacktestError> {
        sample_series()
    }
}
