//! Linear transaction cost.
//!
//! Every order pays `base_fee + proportional_fee * traded value`. The initial
//! amount is pushed through the closed trades: the entry fee comes off before
//! the trade, the remainder grows by the trade's ratio and the exit fee comes
//! off after it.

use super::{AnalysisCriterion, trade_ratio};
use crate::domain::series::BarSeries;
use crate::domain::trade_record::TradeRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransactionCost {
    pub initial_amount: f64,
    pub proportional_fee: f64,
    pub base_fee: f64,
}

struct Simulation {
    final_amount: f64,
    costs: f64,
}

impl LinearTransactionCost {
    pub fn new(initial_amount: f64, proportional_fee: f64, base_fee: f64) -> Self {
        LinearTransactionCost {
            initial_amount,
            proportional_fee,
            base_fee,
        }
    }

    pub fn order_cost(&self, traded_value: f64) -> f64 {
        self.base_fee + self.proportional_fee * traded_value
    }

    /// Fees paid over the record, including the entry of a still open trade.
    pub fn total_costs(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        let mut simulation = self.simulate(series, record);
        if record.current_trade().is_some() {
            simulation.costs += self.order_cost(simulation.final_amount);
        }
        simulation.costs
    }

    fn simulate(&self, series: &BarSeries, record: &TradeRecord) -> Simulation {
        let mut amount = self.initial_amount;
        let mut costs = 0.0;
        for trade in record.trades() {
            let entry_fee = self.order_cost(amount);
            amount = (amount - entry_fee) * trade_ratio(series, trade);
            let exit_fee = self.order_cost(amount);
            amount -= exit_fee;
            costs += entry_fee + exit_fee;
        }
        Simulation {
            final_amount: amount,
            costs,
        }
    }
}

impl AnalysisCriterion for LinearTransactionCost {
    fn name(&self) -> &'static str {
        "LinearTransactionCost"
    }

    /// Net return of the initial amount after costs.
    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        if self.initial_amount == 0.0 {
            return 0.0;
        }
        let simulation = self.simulate(series, record);
        (simulation.final_amount - self.initial_amount) / self.initial_amount
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}
