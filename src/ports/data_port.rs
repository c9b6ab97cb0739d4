//! Bar data access port trait.

use crate::domain::error::BacktestError;
use crate::domain::series::BarSeries;

pub trait DataPort {
    /// Load the complete bar series this source provides.
    fn load_series(&self) -> Result<BarSeries, BacktestError>;
}
