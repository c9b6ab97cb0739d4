//! Profit based criteria.

use super::{AnalysisCriterion, NumberOfBarsInTrades, order_close, trade_ratio};
use crate::domain::series::BarSeries;
use crate::domain::trade::Trade;
use crate::domain::trade_record::TradeRecord;

/// Compounded return across closed trades: product of ratios minus one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalProfit;

impl AnalysisCriterion for TotalProfit {
    fn name(&self) -> &'static str {
        "TotalProfit"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        record
            .trades()
            .iter()
            .map(|t| trade_ratio(series, t))
            .product::<f64>()
            - 1.0
    }

    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        trade_ratio(series, trade) - 1.0
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}

/// Share of closed trades that made money.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageProfitableTrades;

impl AnalysisCriterion for AverageProfitableTrades {
    fn name(&self) -> &'static str {
        "AverageProfitableTrades"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        let trades = record.trades();
        if trades.is_empty() {
            return 0.0;
        }
        let winners = trades
            .iter()
            .filter(|t| trade_ratio(series, t) > 1.0)
            .count();
        winners as f64 / trades.len() as f64
    }

    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        if trade.is_closed() && trade_ratio(series, trade) > 1.0 {
            1.0
        } else {
            0.0
        }
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}

/// Geometric mean return per bar spent in closed trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageProfit;

impl AnalysisCriterion for AverageProfit {
    fn name(&self) -> &'static str {
        "AverageProfit"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        let bars = NumberOfBarsInTrades.calculate(series, record);
        if bars == 0.0 {
            return 0.0;
        }
        let total = TotalProfit.calculate(series, record);
        (1.0 + total).powf(1.0 / bars) - 1.0
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}

/// Absolute profit or loss: price difference times traded amount, summed over
/// closed trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitLoss;

impl AnalysisCriterion for ProfitLoss {
    fn name(&self) -> &'static str {
        "ProfitLoss"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        record
            .trades()
            .iter()
            .map(|t| self.calculate_trade(series, t))
            .fold(0.0, |acc, v| acc + v)
    }

    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        let Some(exit) = &trade.exit else {
            return 0.0;
        };
        let diff = (order_close(series, exit) - order_close(series, &trade.entry))
            * trade.entry.amount;
        if trade.is_long() { diff } else { -diff }
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}
