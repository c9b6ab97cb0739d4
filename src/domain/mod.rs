//! Core domain types and logic.

pub mod backtest;
pub mod bar;
pub mod cash_flow;
pub mod config_validation;
pub mod criteria;
pub mod demo;
pub mod error;
pub mod indicator;
pub mod rule;
pub mod rule_eval;
pub mod rule_parser;
pub mod runner;
pub mod series;
pub mod strategy;
pub mod trade;
pub mod trade_record;
