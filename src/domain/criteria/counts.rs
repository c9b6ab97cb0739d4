//! Counting criteria.

use super::AnalysisCriterion;
use crate::domain::series::BarSeries;
use crate::domain::trade::Trade;
use crate::domain::trade_record::TradeRecord;

/// Number of bars in the series.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOfBars;

impl AnalysisCriterion for NumberOfBars {
    fn name(&self) -> &'static str {
        "NumberOfBars"
    }

    fn calculate(&self, series: &BarSeries, _record: &TradeRecord) -> f64 {
        series.len() as f64
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a < b
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOfTrades;

impl AnalysisCriterion for NumberOfTrades {
    fn name(&self) -> &'static str {
        "NumberOfTrades"
    }

    fn calculate(&self, _series: &BarSeries, record: &TradeRecord) -> f64 {
        record.trade_count() as f64
    }

    fn calculate_trade(&self, _series: &BarSeries, trade: &Trade) -> f64 {
        if trade.is_closed() { 1.0 } else { 0.0 }
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a < b
    }
}

/// Bars spent inside closed trades, entry and exit bars included.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOfBarsInTrades;

impl AnalysisCriterion for NumberOfBarsInTrades {
    fn name(&self) -> &'static str {
        "NumberOfBarsInTrades"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        record
            .trades()
            .iter()
            .map(|t| self.calculate_trade(series, t))
            .fold(0.0, |acc, v| acc + v)
    }

    fn calculate_trade(&self, _series: &BarSeries, trade: &Trade) -> f64 {
        trade.bar_count().unwrap_or(0) as f64
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a < b
    }
}
