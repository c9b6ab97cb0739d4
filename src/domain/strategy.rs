//! Strategy configuration and composition.
//!
//! A strategy is an entry rule paired with an exit rule. It holds no state of
//! its own; whether it wants to enter or exit at a bar depends only on the
//! rules, the precomputed indicators and the trade record so far.

use std::collections::{BTreeSet, HashMap};

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::rule::{Operand, Rule, extract_indicators};
use crate::domain::rule_eval::evaluate;
use crate::domain::series::BarSeries;
use crate::domain::trade_record::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub entry: Rule,
    pub exit: Rule,
    /// Leading bars during which the strategy never signals.
    pub unstable_period: usize,
}

impl Strategy {
    pub fn new(name: impl Into<String>, entry: Rule, exit: Rule) -> Self {
        Strategy {
            name: name.into(),
            entry,
            exit,
            unstable_period: 0,
        }
    }

    pub fn with_unstable_period(mut self, unstable_period: usize) -> Self {
        self.unstable_period = unstable_period;
        self
    }

    pub fn is_unstable_at(&self, index: usize) -> bool {
        index < self.unstable_period
    }

    /// Indicators both rules need computed.
    pub fn indicators(&self) -> BTreeSet<IndicatorType> {
        let mut indicators = extract_indicators(&self.entry);
        indicators.extend(extract_indicators(&self.exit));
        indicators
    }

    pub fn should_enter(
        &self,
        index: usize,
        series: &BarSeries,
        indicators: &HashMap<IndicatorType, IndicatorSeries>,
    ) -> bool {
        !self.is_unstable_at(index) && evaluate(&self.entry, series, indicators, index)
    }

    pub fn should_exit(
        &self,
        index: usize,
        series: &BarSeries,
        indicators: &HashMap<IndicatorType, IndicatorSeries>,
    ) -> bool {
        !self.is_unstable_at(index) && evaluate(&self.exit, series, indicators, index)
    }

    /// Entry signal while flat, exit signal while a trade is open.
    pub fn should_operate(
        &self,
        index: usize,
        record: &TradeRecord,
        series: &BarSeries,
        indicators: &HashMap<IndicatorType, IndicatorSeries>,
    ) -> bool {
        if record.is_closed() {
            self.should_enter(index, series, indicators)
        } else {
            self.should_exit(index, series, indicators)
        }
    }
}

/// Enter while the SMA of the close is under the close, exit once it is over.
pub fn sma_under_strategy(period: usize) -> Strategy {
    let sma = Operand::Indicator(IndicatorType::Sma(period));
    Strategy::new(
        format!("{}-bar SMA under", period),
        Rule::under(sma.clone(), Operand::Close),
        Rule::over(sma, Operand::Close),
    )
}

/// Enter while the SMA of the close is over the close, exit once it is under.
pub fn sma_over_strategy(period: usize) -> Strategy {
    let sma = Operand::Indicator(IndicatorType::Sma(period));
    Strategy::new(
        format!("{}-bar SMA over", period),
        Rule::over(sma.clone(), Operand::Close),
        Rule::under(sma, Operand::Close),
    )
}
