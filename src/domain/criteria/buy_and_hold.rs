//! Criteria comparing against holding the instrument.

use super::{AnalysisCriterion, TotalProfit, order_close};
use crate::domain::series::BarSeries;
use crate::domain::trade::Trade;
use crate::domain::trade_record::TradeRecord;

/// Return of buying at the first close and selling at the last, whatever the
/// strategy did.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyAndHold;

fn relative_change(from: f64, to: f64) -> f64 {
    if from == 0.0 || !from.is_finite() || !to.is_finite() {
        return 0.0;
    }
    (to - from) / from
}

impl AnalysisCriterion for BuyAndHold {
    fn name(&self) -> &'static str {
        "BuyAndHold"
    }

    fn calculate(&self, series: &BarSeries, _record: &TradeRecord) -> f64 {
        match (series.first(), series.last()) {
            (Some(first), Some(last)) => relative_change(first.close, last.close),
            _ => 0.0,
        }
    }

    /// Holding over the trade's span, long regardless of the trade direction.
    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        match &trade.exit {
            Some(exit) => relative_change(order_close(series, &trade.entry), order_close(series, exit)),
            None => 0.0,
        }
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}

/// Strategy growth relative to buy-and-hold growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersusBuyAndHold;

fn growth_ratio(strategy: f64, hold: f64) -> f64 {
    let hold_growth = 1.0 + hold;
    if hold_growth == 0.0 {
        return 0.0;
    }
    (1.0 + strategy) / hold_growth
}

impl AnalysisCriterion for VersusBuyAndHold {
    fn name(&self) -> &'static str {
        "VersusBuyAndHold"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        growth_ratio(
            TotalProfit.calculate(series, record),
            BuyAndHold.calculate(series, record),
        )
    }

    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        growth_ratio(
            TotalProfit.calculate_trade(series, trade),
            BuyAndHold.calculate_trade(series, trade),
        )
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}
