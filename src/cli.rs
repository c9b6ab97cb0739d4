//! CLI definition and dispatch.
//!
//! Without a subcommand the built-in demo runs: the sample series, the two
//! SMA strategies and the default settings.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sample_data_adapter::SampleDataAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{BacktestConfig, BacktestResult, run_backtest};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::criteria::LinearTransactionCost;
use crate::domain::demo::demo_strategies;
use crate::domain::error::BacktestError;
use crate::domain::rule::Rule;
use crate::domain::rule_parser;
use crate::domain::strategy::Strategy;
use crate::domain::trade::OrderDirection;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "smabacktest", about = "Moving-average strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the backtest report, optionally with a config file and bar data
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Validate a configuration file and its rules
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        None => run_report(None, None),
        Some(Command::Run { config, data }) => run_report(config.as_deref(), data.as_deref()),
        Some(Command::Validate { config }) => run_validate(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            (&e).into()
        }
    }
}

fn report_error(err: &BacktestError) {
    tracing::error!(error = %err, "command failed");
    eprintln!("error: {err}");
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, BacktestError> {
    FileConfigAdapter::from_file(path)
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, BacktestError> {
    let defaults = BacktestConfig::default();

    let start_direction = match adapter.get_string("backtest", "start_direction") {
        None => defaults.start_direction,
        Some(raw) => OrderDirection::parse(&raw).ok_or_else(|| BacktestError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_direction".into(),
            reason: format!("unknown direction '{raw}', expected buy or sell"),
        })?,
    };

    let cost = defaults.transaction_cost;
    Ok(BacktestConfig {
        sma_period: adapter.get_count("backtest", "sma_period", defaults.sma_period)?,
        amount: adapter.get_double("backtest", "amount", defaults.amount),
        start_direction,
        unstable_period: adapter.get_count(
            "backtest",
            "unstable_period",
            defaults.unstable_period,
        )?,
        transaction_cost: LinearTransactionCost::new(
            adapter.get_double("transaction_cost", "initial_amount", cost.initial_amount),
            adapter.get_double("transaction_cost", "proportional_fee", cost.proportional_fee),
            adapter.get_double("transaction_cost", "base_fee", cost.base_fee),
        ),
    })
}

/// The configured strategy when `[strategy]` holds both rules, otherwise the
/// two demo strategies.
pub fn build_strategies(
    adapter: &dyn ConfigPort,
    config: &BacktestConfig,
) -> Result<Vec<Strategy>, BacktestError> {
    let entry = adapter
        .get_string("strategy", "entry")
        .filter(|s| !s.trim().is_empty());
    let exit = adapter
        .get_string("strategy", "exit")
        .filter(|s| !s.trim().is_empty());

    let (Some(entry), Some(exit)) = (entry, exit) else {
        return Ok(demo_strategies(config));
    };

    let name = adapter
        .get_string("strategy", "name")
        .unwrap_or_else(|| "Configured strategy".to_string());
    let entry_rule = parse_rule("entry", &entry)?;
    let exit_rule = parse_rule("exit", &exit)?;

    Ok(vec![
        Strategy::new(name, entry_rule, exit_rule).with_unstable_period(config.unstable_period),
    ])
}

fn parse_rule(key: &str, text: &str) -> Result<Rule, BacktestError> {
    rule_parser::parse(text).map_err(|e| {
        eprintln!("error: failed to parse {key}:\n{}", e.display_with_context(text));
        BacktestError::from(e)
    })
}

/// Data file from `--data`, else `[data] csv_path` resolved against the
/// config file's directory.
pub fn resolve_data_path(
    data_override: Option<&Path>,
    adapter: Option<&dyn ConfigPort>,
    config_path: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = data_override {
        return Some(path.to_path_buf());
    }
    let configured = adapter?
        .get_string("data", "csv_path")
        .filter(|s| !s.trim().is_empty())?;
    let configured = PathBuf::from(configured.trim());
    match config_path.and_then(Path::parent) {
        Some(dir) if configured.is_relative() => Some(dir.join(configured)),
        _ => Some(configured),
    }
}

/// Load the series, run every strategy and write the report.
pub fn run_pipeline(
    data: &dyn DataPort,
    strategies: &[Strategy],
    config: &BacktestConfig,
    report: &dyn ReportPort,
    out: &mut dyn Write,
) -> Result<BacktestResult, BacktestError> {
    let series = data.load_series()?;
    tracing::info!(
        series = series.name(),
        bars = series.len(),
        strategies = strategies.len(),
        "starting backtest"
    );
    let result = run_backtest(&series, strategies, config);
    report.write(&result, out)?;
    Ok(result)
}

fn run_report(config_path: Option<&Path>, data_override: Option<&Path>) -> Result<(), BacktestError> {
    let adapter = match config_path {
        Some(path) => {
            let adapter = load_config(path)?;
            validate_backtest_config(&adapter)?;
            validate_strategy_config(&adapter)?;
            Some(adapter)
        }
        None => None,
    };
    let port = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let (config, strategies) = match port {
        Some(port) => {
            let config = build_backtest_config(port)?;
            let strategies = build_strategies(port, &config)?;
            (config, strategies)
        }
        None => {
            let config = BacktestConfig::default();
            let strategies = demo_strategies(&config);
            (config, strategies)
        }
    };

    let data: Box<dyn DataPort> = match resolve_data_path(data_override, port, config_path) {
        Some(path) => Box::new(CsvAdapter::new(path)),
        None => Box::new(SampleDataAdapter),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_pipeline(data.as_ref(), &strategies, &config, &TextReportAdapter, &mut out)?;
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), BacktestError> {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;

    let config = build_backtest_config(&adapter)?;
    let strategies = build_strategies(&adapter, &config)?;
    for strategy in &strategies {
        eprintln!("\n{}:", strategy.name);
        eprintln!("  entry: {}", strategy.entry);
        eprintln!("  exit:  {}", strategy.exit);
        let indicators: Vec<String> = strategy.indicators().iter().map(|i| i.to_string()).collect();
        eprintln!("  indicators: {}", indicators.join(", "));
    }

    eprintln!("\nConfiguration is valid.");
    Ok(())
}
