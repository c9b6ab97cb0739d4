//! Technical indicator implementations.
//!
//! Indicators are computed eagerly over a whole [`BarSeries`] and produce one
//! value per bar, index-aligned with the series:
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: the computed values for one indicator type
//!
//! Moving averages use a partial window at the start of the series instead of
//! a warmup period, so every computed value is usable.

pub mod ema;
pub mod sma;

use crate::domain::series::BarSeries;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    /// Value at `index`, NaN when the index is outside the computed range.
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(f64::NAN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IndicatorType {
    pub fn calculate(&self, series: &BarSeries) -> IndicatorSeries {
        match *self {
            IndicatorType::Sma(period) => sma::calculate_sma(series, period),
            IndicatorType::Ema(period) => ema::calculate_ema(series, period),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
        }
    }
}

/// Compute each distinct indicator once over the series.
pub fn compute_indicators<'a>(
    series: &BarSeries,
    types: impl IntoIterator<Item = &'a IndicatorType>,
) -> HashMap<IndicatorType, IndicatorSeries> {
    let mut computed = HashMap::new();
    for indicator_type in types {
        computed
            .entry(*indicator_type)
            .or_insert_with(|| indicator_type.calculate(series));
    }
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        BarSeries::from_bars(
            "TEST",
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| Bar::flat(start + chrono::Duration::days(i as i64), p, 1000)),
        )
        .unwrap()
    }

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(3).to_string(), "SMA(3)");
        assert_eq!(IndicatorType::Ema(12).to_string(), "EMA(12)");
    }

    #[test]
    fn indicator_type_hash_eq() {
        let mut map = HashMap::new();
        map.insert(IndicatorType::Sma(20), "sma20");
        map.insert(IndicatorType::Sma(50), "sma50");
        map.insert(IndicatorType::Ema(20), "ema20");

        assert_eq!(map.get(&IndicatorType::Sma(20)), Some(&"sma20"));
        assert_eq!(map.get(&IndicatorType::Sma(50)), Some(&"sma50"));
        assert_eq!(map.get(&IndicatorType::Ema(20)), Some(&"ema20"));
        assert_eq!(map.get(&IndicatorType::Ema(50)), None);
    }

    #[test]
    fn compute_indicators_dedups_types() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let types = [
            IndicatorType::Sma(2),
            IndicatorType::Sma(2),
            IndicatorType::Ema(2),
        ];
        let computed = compute_indicators(&series, &types);

        assert_eq!(computed.len(), 2);
        assert_eq!(computed[&IndicatorType::Sma(2)].values, vec![1.0, 1.5, 2.5]);
        assert_eq!(computed[&IndicatorType::Ema(2)].len(), 3);
    }

    #[test]
    fn series_value_out_of_range_is_nan() {
        let s = IndicatorSeries {
            indicator_type: IndicatorType::Sma(1),
            values: vec![1.0],
        };
        assert_eq!(s.value(0), 1.0);
        assert!(s.value(1).is_nan());
        assert!(!s.is_empty());
    }
}
