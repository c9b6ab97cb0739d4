//! Risk criteria derived from the cash flow.

use super::{AnalysisCriterion, TotalProfit};
use crate::domain::cash_flow::CashFlow;
use crate::domain::series::BarSeries;
use crate::domain::trade_record::TradeRecord;

/// Largest relative fall from a running peak of the cash flow, in [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumDrawdown;

pub(crate) fn max_drawdown(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let mut peak = first;
    let mut max_dd = 0.0_f64;
    for &value in values {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

impl AnalysisCriterion for MaximumDrawdown {
    fn name(&self) -> &'static str {
        "MaximumDrawdown"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        max_drawdown(CashFlow::new(series, record).values())
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a < b
    }
}

/// Total profit per unit of maximum drawdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardRiskRatio;

impl AnalysisCriterion for RewardRiskRatio {
    fn name(&self) -> &'static str {
        "RewardRiskRatio"
    }

    fn calculate(&self, series: &BarSeries, record: &TradeRecord) -> f64 {
        let reward = TotalProfit.calculate(series, record);
        let risk = MaximumDrawdown.calculate(series, record);
        if risk == 0.0 {
            return if reward > 0.0 { f64::INFINITY } else { 0.0 };
        }
        reward / risk
    }

    fn better_than(&self, a: f64, b: f64) -> bool {
        a > b
    }
}
