//! Analysis criteria.
//!
//! Each criterion reduces a trade record over a series to one number and knows
//! whether a higher or a lower value is preferable. Only closed trades count
//! unless a criterion says otherwise.

mod buy_and_hold;
mod counts;
mod drawdown;
mod profit;
mod transaction_cost;

pub use buy_and_hold::{BuyAndHold, VersusBuyAndHold};
pub use counts::{NumberOfBars, NumberOfBarsInTrades, NumberOfTrades};
pub use drawdown::{MaximumDrawdown, RewardRiskRatio};
pub use profit::{AverageProfit, AverageProfitableTrades, ProfitLoss, TotalProfit};
pub use transaction_cost::LinearTransactionCost;

use crate::domain::runner::{RunConfig, run_strategy};
use crate::domain::series::BarSeries;
use crate::domain::strategy::Strategy;
use crate::domain::trade::{Order, Trade};
use crate::domain::trade_record::TradeRecord;

pub trait AnalysisCriterion {
    fn name(&self) -> &'static str;

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64;

    /// Value for a single trade, by default the value of a record holding
    /// only that trade.
    fn calculate_trade(&self, series: &BarSeries, trade: &Trade) -> f64 {
        self.calculate(series, &single_trade_record(trade))
    }

    /// True when `a` is preferable to `b`.
    fn better_than(&self, a: f64, b: f64) -> bool;
}

/// The criteria reported for every run, in report order.
pub fn standard_criteria(transaction_cost: LinearTransactionCost) -> Vec<Box<dyn AnalysisCriterion>> {
    vec![
        Box::new(AverageProfitableTrades),
        Box::new(AverageProfit),
        Box::new(BuyAndHold),
        Box::new(transaction_cost),
        Box::new(MaximumDrawdown),
        Box::new(NumberOfBars),
        Box::new(NumberOfTrades),
        Box::new(NumberOfBarsInTrades),
        Box::new(RewardRiskRatio),
        Box::new(TotalProfit),
        Box::new(ProfitLoss),
        Box::new(VersusBuyAndHold),
    ]
}

/// Run every candidate and return the index of the one scoring best.
///
/// Ties keep the earlier candidate. None when there are no candidates.
pub fn choose_best(
    criterion: &dyn AnalysisCriterion,
    series: &BarSeries,
    candidates: &[Strategy],
    config: &RunConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, strategy) in candidates.iter().enumerate() {
        let record = run_strategy(series, strategy, config);
        let value = criterion.calculate(series, &record);
        match best {
            Some((_, best_value)) if !criterion.better_than(value, best_value) => {}
            _ => best = Some((index, value)),
        }
    }
    if let Some((index, value)) = best {
        tracing::debug!(criterion = criterion.name(), index, value, "best candidate");
    }
    best.map(|(index, _)| index)
}

/// Close price at the order's bar, falling back to the fill price.
pub(crate) fn order_close(series: &BarSeries, order: &Order) -> f64 {
    series.bar(order.index).map(|b| b.close).unwrap_or(order.price)
}

/// Gross return ratio of a closed trade; 1.0 for an open one.
pub(crate) fn trade_ratio(series: &BarSeries, trade: &Trade) -> f64 {
    let Some(exit) = &trade.exit else {
        return 1.0;
    };
    let entry_price = order_close(series, &trade.entry);
    let exit_price = order_close(series, exit);
    if trade.is_long() {
        exit_price / entry_price
    } else {
        entry_price / exit_price
    }
}

fn single_trade_record(trade: &Trade) -> TradeRecord {
    let mut record = TradeRecord::new(trade.entry.direction);
    record.operate(trade.entry.index, trade.entry.price, trade.entry.amount);
    if let Some(exit) = &trade.exit {
        record.operate(exit.index, exit.price, exit.amount);
    }
    record
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::strategy::{sma_over_strategy, sma_under_strategy};
    use crate::domain::trade::OrderDirection;
    use approx::assert_relative_eq;

    #[test]
    fn trade_ratio_long_and_short() {
        let series = make_series(&[100.0, 80.0]);
        let long = record(OrderDirection::Buy, &series, &[0, 1], 1.0);
        let short = record(OrderDirection::Sell, &series, &[0, 1], 1.0);

        assert_relative_eq!(trade_ratio(&series, &long.trades()[0]), 0.8, epsilon = 1e-12);
        assert_relative_eq!(trade_ratio(&series, &short.trades()[0]), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn open_trade_ratio_is_neutral() {
        let series = make_series(&[100.0, 80.0]);
        let open = record(OrderDirection::Buy, &series, &[0], 1.0);
        assert_eq!(trade_ratio(&series, open.current_trade().unwrap()), 1.0);
    }

    #[test]
    fn standard_criteria_names_are_unique() {
        let criteria = standard_criteria(LinearTransactionCost::new(5000.0, 0.005, 0.0));
        let mut names: Vec<_> = criteria.iter().map(|c| c.name()).collect();
        assert_eq!(names[0], "AverageProfitableTrades");
        assert_eq!(names[names.len() - 1], "VersusBuyAndHold");
        names.sort();
        names.dedup();
        assert_eq!(names.len(), criteria.len());
    }

    #[test]
    fn choose_best_by_total_profit() {
        let series = fixture();
        let candidates = vec![sma_over_strategy(3), sma_under_strategy(3)];
        let best = choose_best(&TotalProfit, &series, &candidates, &RunConfig::with_amount(50.0));
        assert_eq!(best, Some(1));
    }

    #[test]
    fn choose_best_prefers_lower_when_criterion_says_so() {
        let series = fixture();
        let candidates = vec![sma_under_strategy(3), sma_over_strategy(3)];
        // under drawdown 0.15 beats over drawdown 19/119
        let best = choose_best(&MaximumDrawdown, &series, &candidates, &RunConfig::default());
        assert_eq!(best, Some(0));
    }

    #[test]
    fn choose_best_without_candidates() {
        assert_eq!(
            choose_best(&TotalProfit, &fixture(), &[], &RunConfig::default()),
            None
        );
    }

    #[test]
    fn default_calculate_trade_uses_single_trade() {
        let series = fixture();
        let record = under_record(&series);
        let trade = &record.trades()[0];
        assert_relative_eq!(TotalProfit.calculate_trade(&series, trade), 119.0 / 110.0 - 1.0, epsilon = 1e-12);
    }
}
