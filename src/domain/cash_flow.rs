//! Cash flow (equity curve) implied by a trade record.
//!
//! One value per bar, starting at 1.0. Inside a closed trade the value follows
//! the price relative to the entry close; outside trades it stays flat.

use crate::domain::series::BarSeries;
use crate::domain::trade::Trade;
use crate::domain::trade_record::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlow {
    values: Vec<f64>,
}

impl CashFlow {
    pub fn new(series: &BarSeries, record: &TradeRecord) -> Self {
        let mut values: Vec<f64> = Vec::with_capacity(series.len());
        if series.is_empty() {
            return CashFlow { values };
        }
        values.push(1.0);

        for trade in record.trades() {
            apply_trade(series, trade, &mut values);
        }

        let last = values.last().copied().unwrap_or(1.0);
        values.resize(series.len(), last);
        CashFlow { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn apply_trade(series: &BarSeries, trade: &Trade, values: &mut Vec<f64>) {
    let Some(exit) = trade.exit else {
        return;
    };
    let entry_index = trade.entry.index;
    let exit_index = exit.index.min(series.len().saturating_sub(1));
    if entry_index >= series.len() || exit_index <= entry_index {
        return;
    }

    let last = values.last().copied().unwrap_or(1.0);
    if values.len() <= entry_index {
        values.resize(entry_index + 1, last);
    }
    let entry_value = values[entry_index];
    let entry_close = series.close_at(entry_index);

    // Rewind anything recorded past the entry so overlapping trades cannot
    // extend the curve twice.
    values.truncate(entry_index + 1);
    for index in (entry_index + 1)..=exit_index {
        let close = series.close_at(index);
        let ratio = if trade.is_long() {
            close / entry_close
        } else {
            entry_close / close
        };
        values.push(entry_value * ratio);
    }
}
