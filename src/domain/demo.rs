//! The built-in demonstration: a fixed eight-bar series and two mirrored
//! SMA strategies.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::backtest::BacktestConfig;
use crate::domain::bar::Bar;
use crate::domain::error::BacktestError;
use crate::domain::series::BarSeries;
use crate::domain::strategy::{Strategy, sma_over_strategy, sma_under_strategy};

pub const SAMPLE_CLOSES: [f64; 8] = [100.0, 110.0, 140.0, 119.0, 100.0, 110.0, 120.0, 130.0];
const FIRST_VOLUME: i64 = 1060;

fn first_timestamp() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2018, 1, 1)?.and_hms_opt(12, 0, 0)
}

/// Daily bars from 2018-01-01 12:00, open = high = low = close.
pub fn sample_series() -> Result<BarSeries, BacktestError> {
    let start = first_timestamp().ok_or_else(|| BacktestError::Data {
        source_name: "sample".to_string(),
        reason: "invalid first timestamp".to_string(),
    })?;
    BarSeries::from_bars(
        "sample",
        SAMPLE_CLOSES.iter().enumerate().map(|(i, &close)| {
            Bar::flat(start + Duration::days(i as i64), close, FIRST_VOLUME + 10 * i as i64)
        }),
    )
}

/// The SMA-under and SMA-over strategies for the configured period.
pub fn demo_strategies(config: &BacktestConfig) -> Vec<Strategy> {
    vec![
        sma_under_strategy(config.sma_period).with_unstable_period(config.unstable_period),
        sma_over_strategy(config.sma_period).with_unstable_period(config.unstable_period),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_series_shape() {
        let series = sample_series().unwrap();
        assert_eq!(series.len(), 8);
        assert_eq!(series.closes(), SAMPLE_CLOSES.to_vec());

        let first = series.first().unwrap();
        assert_eq!(first.timestamp.to_string(), "2018-01-01 12:00:00");
        assert_eq!(first.volume, 1060);
        assert_eq!(first.open, first.close);
        assert_eq!(first.high, first.low);
        assert_eq!(series.last().unwrap().volume, 1130);
        assert_eq!(series.last().unwrap().timestamp.to_string(), "2018-01-08 12:00:00");
    }

    #[test]
    fn demo_strategies_follow_config() {
        let config = BacktestConfig {
            sma_period: 5,
            unstable_period: 2,
            ..Default::default()
        };
        let strategies = demo_strategies(&config);
        assert_eq!(strategies.len(), 2);
        assert_eq!(strategies[0].name, "5-bar SMA under");
        assert_eq!(strategies[1].name, "5-bar SMA over");
        assert!(strategies.iter().all(|s| s.unstable_period == 2));
    }
}
