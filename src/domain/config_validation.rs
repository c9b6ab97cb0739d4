//! Configuration validation.
//!
//! Validates every configured value before a backtest runs. Absent keys fall
//! back to their defaults and are always valid.

use crate::domain::error::BacktestError;
use crate::domain::rule_parser;
use crate::domain::trade::OrderDirection;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    validate_sma_period(config)?;
    validate_amount(config)?;
    validate_start_direction(config)?;
    validate_unstable_period(config)?;
    validate_transaction_cost(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let entry = non_empty(config, "strategy", "entry");
    let exit = non_empty(config, "strategy", "exit");
    match (entry, exit) {
        (None, None) => Ok(()),
        (Some(_), None) => Err(missing("strategy", "exit")),
        (None, Some(_)) => Err(missing("strategy", "entry")),
        (Some(entry), Some(exit)) => {
            rule_parser::parse(&entry)?;
            rule_parser::parse(&exit)?;
            Ok(())
        }
    }
}

fn non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .filter(|s| !s.trim().is_empty())
}

fn missing(section: &str, key: &str) -> BacktestError {
    BacktestError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> BacktestError {
    BacktestError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// The raw value must parse as a number when present.
fn numeric(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, BacktestError> {
    match non_empty(config, section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(section, key, &format!("{key} must be a number, got '{raw}'"))),
    }
}

fn validate_sma_period(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    if config.get_count("backtest", "sma_period", 1)? < 1 {
        return Err(invalid(
            "backtest",
            "sma_period",
            "sma_period must be a whole number of at least 1",
        ));
    }
    Ok(())
}

fn validate_amount(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    if let Some(value) = numeric(config, "backtest", "amount")? {
        if value <= 0.0 || !value.is_finite() {
            return Err(invalid("backtest", "amount", "amount must be positive"));
        }
    }
    Ok(())
}

fn validate_start_direction(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    if let Some(raw) = non_empty(config, "backtest", "start_direction") {
        if OrderDirection::parse(&raw).is_none() {
            return Err(invalid(
                "backtest",
                "start_direction",
                "start_direction must be buy or sell",
            ));
        }
    }
    Ok(())
}

fn validate_unstable_period(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    config.get_count("backtest", "unstable_period", 0)?;
    Ok(())
}

fn validate_transaction_cost(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    if let Some(value) = numeric(config, "transaction_cost", "initial_amount")? {
        if value <= 0.0 || !value.is_finite() {
            return Err(invalid(
                "transaction_cost",
                "initial_amount",
                "initial_amount must be positive",
            ));
        }
    }
    for key in ["proportional_fee", "base_fee"] {
        if let Some(value) = numeric(config, "transaction_cost", key)? {
            if value < 0.0 || !value.is_finite() {
                return Err(invalid(
                    "transaction_cost",
                    key,
                    &format!("{key} must be non-negative"),
                ));
            }
        }
    }
    Ok(())
}
