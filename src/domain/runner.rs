//! Simulation runner.
//!
//! Replays a bar series once per strategy. While flat the runner enters on the
//! first bar whose entry rule holds; while in a trade it exits on the first
//! later bar whose exit rule holds. Orders fill at the bar's close with the
//! configured amount.

use crate::domain::indicator::compute_indicators;
use crate::domain::series::BarSeries;
use crate::domain::strategy::Strategy;
use crate::domain::trade::OrderDirection;
use crate::domain::trade_record::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub start_direction: OrderDirection,
    /// Quantity of every order.
    pub amount: f64,
    pub begin_index: Option<usize>,
    pub end_index: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            start_direction: OrderDirection::Buy,
            amount: 1.0,
            begin_index: None,
            end_index: None,
        }
    }
}

impl RunConfig {
    pub fn with_amount(amount: f64) -> Self {
        RunConfig {
            amount,
            ..Default::default()
        }
    }
}

/// Run `strategy` over `series`.
///
/// Bounds are clamped to the series. A trade still open at the end index may
/// be closed by a later bar; no new trade is opened past the end index.
pub fn run_strategy(series: &BarSeries, strategy: &Strategy, config: &RunConfig) -> TradeRecord {
    let mut record = TradeRecord::new(config.start_direction);

    let Some(series_end) = series.end_index() else {
        tracing::debug!(strategy = %strategy.name, "empty series, nothing to run");
        return record;
    };
    let begin = config.begin_index.unwrap_or(0);
    let end = config.end_index.unwrap_or(series_end).min(series_end);
    if begin > end {
        return record;
    }

    let indicators = compute_indicators(series, &strategy.indicators());

    for index in begin..=end {
        if strategy.should_operate(index, &record, series, &indicators) {
            let order = record.operate(index, series.close_at(index), config.amount);
            tracing::debug!(strategy = %strategy.name, %order, "order executed");
        }
    }

    if !record.is_closed() {
        for index in (end + 1)..=series_end {
            if strategy.should_exit(index, series, &indicators) {
                let order = record.operate(index, series.close_at(index), config.amount);
                tracing::debug!(strategy = %strategy.name, %order, "order executed past run end");
                break;
            }
        }
    }

    tracing::info!(
        strategy = %strategy.name,
        series = series.name(),
        bars = end - begin + 1,
        trades = record.trade_count(),
        open = !record.is_closed(),
        "run complete"
    );

    record
}
