//! Simple Moving Average indicator.
//!
//! O(n) running window sum over the close price.
//! SMA(n)[i] = mean(P[max(0, i-n+1)..=i]); the first n-1 values average the
//! shorter window that is available.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::series::BarSeries;

pub fn calculate_sma(series: &BarSeries, period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: calculate_sma_values(&series.closes(), period),
    }
}

/// SMA over an arbitrary base series. Empty for an empty base or period 0.
pub fn calculate_sma_values(base: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || base.is_empty() {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(base.len());
    let mut window_sum = 0.0;

    for (i, &price) in base.iter().enumerate() {
        window_sum += price;
        if i >= period {
            window_sum -= base[i - period];
        }
        let window_len = period.min(i + 1);
        values.push(window_sum / window_len as f64);
    }

    values
}
