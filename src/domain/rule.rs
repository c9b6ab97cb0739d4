//! Rule AST data structures.
//!
//! This module defines the abstract syntax tree for trading rules:
//! - `Operand`: What can be compared (price fields, constants, indicators)
//! - `Rule`: The rule AST with comparison, crossing and composite variants
//!
//! `Display` renders a rule in the same text form the rule parser accepts.

use crate::domain::indicator::IndicatorType;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Open,
    High,
    Low,
    Close,
    Volume,
    Constant(f64),
    Indicator(IndicatorType),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// left < right
    Under { left: Operand, right: Operand },
    /// left > right
    Over { left: Operand, right: Operand },
    CrossedUp { left: Operand, right: Operand },
    CrossedDown { left: Operand, right: Operand },
    And(Vec<Rule>),
    Or(Vec<Rule>),
    Not(Box<Rule>),
}

impl Rule {
    pub fn under(left: Operand, right: Operand) -> Self {
        Rule::Under { left, right }
    }

    pub fn over(left: Operand, right: Operand) -> Self {
        Rule::Over { left, right }
    }
}

/// Collect the indicator types a rule needs computed before evaluation.
pub fn extract_indicators(rule: &Rule) -> BTreeSet<IndicatorType> {
    let mut out = BTreeSet::new();
    collect_indicators(rule, &mut out);
    out
}

fn collect_indicators(rule: &Rule, out: &mut BTreeSet<IndicatorType>) {
    match rule {
        Rule::Under { left, right }
        | Rule::Over { left, right }
        | Rule::CrossedUp { left, right }
        | Rule::CrossedDown { left, right } => {
            for operand in [left, right] {
                if let Operand::Indicator(t) = operand {
                    out.insert(*t);
                }
            }
        }
        Rule::And(rules) | Rule::Or(rules) => {
            for r in rules {
                collect_indicators(r, out);
            }
        }
        Rule::Not(rule) => collect_indicators(rule, out),
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Open => write!(f, "open"),
            Operand::High => write!(f, "high"),
            Operand::Low => write!(f, "low"),
            Operand::Close => write!(f, "close"),
            Operand::Volume => write!(f, "volume"),
            Operand::Constant(v) => write!(f, "{}", v),
            Operand::Indicator(t) => write!(f, "{}", t),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, rules: &[Rule]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, r) in rules.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", r)?;
    }
    write!(f, ")")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Under { left, right } => write!(f, "UNDER({}, {})", left, right),
            Rule::Over { left, right } => write!(f, "OVER({}, {})", left, right),
            Rule::CrossedUp { left, right } => write!(f, "CROSS_UP({}, {})", left, right),
            Rule::CrossedDown { left, right } => write!(f, "CROSS_DOWN({}, {})", left, right),
            Rule::And(rules) => write_list(f, "AND", rules),
            Rule::Or(rules) => write_list(f, "OR", rules),
            Rule::Not(rule) => write!(f, "NOT({})", rule),
        }
    }
}
