//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = EMA[i-1] + k * (C[i] - EMA[i-1]).
//! No warmup: the first value is the first close.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::series::BarSeries;

pub fn calculate_ema(series: &BarSeries, period: usize) -> IndicatorSeries {
    if period == 0 || series.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(period),
            values: Vec::new(),
        };
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(series.len());
    let mut ema = 0.0;

    for (i, bar) in series.bars().iter().enumerate() {
        ema = if i == 0 {
            bar.close
        } else {
            ema + k * (bar.close - ema)
        };
        values.push(ema);
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
