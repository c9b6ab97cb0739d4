//! Backtest parameters and the comparison run.
//!
//! A backtest runs every strategy once over the same series and evaluates the
//! standard criteria against each resulting trade record.

use crate::domain::criteria::{LinearTransactionCost, standard_criteria};
use crate::domain::runner::{RunConfig, run_strategy};
use crate::domain::series::BarSeries;
use crate::domain::strategy::Strategy;
use crate::domain::trade::OrderDirection;
use crate::domain::trade_record::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub sma_period: usize,
    pub amount: f64,
    pub start_direction: OrderDirection,
    pub unstable_period: usize,
    pub transaction_cost: LinearTransactionCost,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            sma_period: 3,
            amount: 50.0,
            start_direction: OrderDirection::Buy,
            unstable_period: 0,
            transaction_cost: LinearTransactionCost::new(5000.0, 0.005, 0.0),
        }
    }
}

impl BacktestConfig {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            start_direction: self.start_direction,
            amount: self.amount,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    pub strategy_name: String,
    pub record: TradeRecord,
}

/// One criterion evaluated for every strategy, in strategy order.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionRow {
    pub name: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub series_name: String,
    pub bar_count: usize,
    pub runs: Vec<StrategyRun>,
    pub criteria: Vec<CriterionRow>,
}

impl BacktestResult {
    pub fn criterion(&self, name: &str) -> Option<&CriterionRow> {
        self.criteria.iter().find(|row| row.name == name)
    }
}

pub fn run_backtest(
    series: &BarSeries,
    strategies: &[Strategy],
    config: &BacktestConfig,
) -> BacktestResult {
    let run_config = config.run_config();
    let runs: Vec<StrategyRun> = strategies
        .iter()
        .map(|strategy| StrategyRun {
            strategy_name: strategy.name.clone(),
            record: run_strategy(series, strategy, &run_config),
        })
        .collect();

    let criteria = standard_criteria(config.transaction_cost)
        .iter()
        .map(|criterion| CriterionRow {
            name: criterion.name(),
            values: runs
                .iter()
                .map(|run| criterion.calculate(series, &run.record))
                .collect(),
        })
        .collect();

    BacktestResult {
        series_name: series.name().to_string(),
        bar_count: series.len(),
        runs,
        criteria,
    }
}
