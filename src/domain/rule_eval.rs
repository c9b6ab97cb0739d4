//! Rule evaluation engine.
//!
//! Evaluates rules against a bar series and pre-computed indicator values.
//!
//! # Evaluation Semantics
//!
//! - `UNDER`/`OVER`: strict comparison at the given bar index; equal values
//!   satisfy neither
//! - `CROSS_UP`/`CROSS_DOWN`: Require `index >= 1`, return `false` at index 0
//! - `AND`: Short-circuits on first `false`
//! - `OR`: Short-circuits on first `true`
//! - Unresolvable operands (missing indicator, index out of range) are NaN and
//!   every comparison involving them is `false`

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::rule::{Operand, Rule};
use crate::domain::series::BarSeries;
use std::collections::HashMap;

pub fn evaluate(
    rule: &Rule,
    series: &BarSeries,
    indicators: &HashMap<IndicatorType, IndicatorSeries>,
    bar_index: usize,
) -> bool {
    match rule {
        Rule::Under { left, right } => {
            let left_val = resolve_operand(left, series, indicators, bar_index);
            let right_val = resolve_operand(right, series, indicators, bar_index);
            left_val < right_val
        }
        Rule::Over { left, right } => {
            let left_val = resolve_operand(left, series, indicators, bar_index);
            let right_val = resolve_operand(right, series, indicators, bar_index);
            left_val > right_val
        }
        Rule::CrossedUp { left, right } => {
            if bar_index == 0 {
                return false;
            }
            let left_curr = resolve_operand(left, series, indicators, bar_index);
            let right_curr = resolve_operand(right, series, indicators, bar_index);
            let left_prev = resolve_operand(left, series, indicators, bar_index - 1);
            let right_prev = resolve_operand(right, series, indicators, bar_index - 1);

            left_curr > right_curr && left_prev <= right_prev
        }
        Rule::CrossedDown { left, right } => {
            if bar_index == 0 {
                return false;
            }
            let left_curr = resolve_operand(left, series, indicators, bar_index);
            let right_curr = resolve_operand(right, series, indicators, bar_index);
            let left_prev = resolve_operand(left, series, indicators, bar_index - 1);
            let right_prev = resolve_operand(right, series, indicators, bar_index - 1);

            left_curr < right_curr && left_prev >= right_prev
        }
        Rule::And(rules) => rules
            .iter()
            .all(|r| evaluate(r, series, indicators, bar_index)),
        Rule::Or(rules) => rules
            .iter()
            .any(|r| evaluate(r, series, indicators, bar_index)),
        Rule::Not(rule) => !evaluate(rule, series, indicators, bar_index),
    }
}

fn resolve_operand(
    operand: &Operand,
    series: &BarSeries,
    indicators: &HashMap<IndicatorType, IndicatorSeries>,
    bar_index: usize,
) -> f64 {
    match operand {
        Operand::Open => bar_field(series, bar_index, |b| b.open),
        Operand::High => bar_field(series, bar_index, |b| b.high),
        Operand::Low => bar_field(series, bar_index, |b| b.low),
        Operand::Close => bar_field(series, bar_index, |b| b.close),
        Operand::Volume => bar_field(series, bar_index, |b| b.volume as f64),
        Operand::Constant(v) => *v,
        Operand::Indicator(indicator_type) => indicators
            .get(indicator_type)
            .map(|s| s.value(bar_index))
            .unwrap_or(f64::NAN),
    }
}

fn bar_field(series: &BarSeries, bar_index: usize, field: impl Fn(&Bar) -> f64) -> f64 {
    series.bar(bar_index).map(field).unwrap_or(f64::NAN)
}
