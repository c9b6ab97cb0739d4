//! CLI integration tests for configuration and report orchestration.
//!
//! Tests cover:
//! - Config parsing (build_backtest_config, build_strategies)
//! - Data path resolution (resolve_data_path)
//! - Full pipeline with MockDataPort and the text report
//! - CSV bar files and INI files on disk
//! - Exit code mapping of pipeline errors

mod common;

use approx::assert_relative_eq;
use common::*;
use smabacktest::adapters::csv_adapter::CsvAdapter;
use smabacktest::adapters::file_config_adapter::FileConfigAdapter;
use smabacktest::adapters::text_report_adapter::TextReportAdapter;
use smabacktest::cli;
use smabacktest::domain::backtest::BacktestConfig;
use smabacktest::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use smabacktest::domain::demo::demo_strategies;
use smabacktest::domain::error::BacktestError;
use smabacktest::domain::trade::OrderDirection;
use smabacktest::ports::config_port::ConfigPort;
use std::path::{Path, PathBuf};

const VALID_INI: &str = r#"
[backtest]
sma_period = 4
amount = 10
start_direction = sell
unstable_period = 1

[transaction_cost]
initial_amount = 1000
proportional_fee = 0.01
base_fee = 2

[strategy]
name = Threshold
entry = OVER(close, 115)
exit = UNDER(close, 115)

[data]
csv_path = bars.csv
"#;

fn render(result_text: Vec<u8>) -> String {
    String::from_utf8(result_text).unwrap()
}

mod config_loading {
    use super::*;

    #[test]
    fn build_backtest_config_full() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();

        assert_eq!(config.sma_period, 4);
        assert!((config.amount - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.start_direction, OrderDirection::Sell);
        assert_eq!(config.unstable_period, 1);
        assert!((config.transaction_cost.initial_amount - 1000.0).abs() < f64::EPSILON);
        assert!((config.transaction_cost.proportional_fee - 0.01).abs() < f64::EPSILON);
        assert!((config.transaction_cost.base_fee - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_backtest_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();
        assert_eq!(config, BacktestConfig::default());
    }

    #[test]
    fn build_backtest_config_rejects_unknown_direction() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nstart_direction = up\n").unwrap();
        let err = cli::build_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, BacktestError::ConfigInvalid { ref key, .. } if key == "start_direction"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn float_sma_period_is_rejected_not_defaulted() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nsma_period = 5.0\n").unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, BacktestError::ConfigInvalid { ref key, .. } if key == "sma_period"));

        let err = cli::build_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, BacktestError::ConfigInvalid { ref key, .. } if key == "sma_period"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn configured_rules_replace_demo_strategies() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();
        let strategies = cli::build_strategies(&adapter, &config).unwrap();

        assert_eq!(strategies.len(), 1);
        assert_eq!(strategies[0].name, "Threshold");
        assert_eq!(strategies[0].entry.to_string(), "OVER(close, 115)");
        assert_eq!(strategies[0].unstable_period, 1);
    }

    #[test]
    fn missing_rules_fall_back_to_demo() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nsma_period = 5\n").unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();
        let strategies = cli::build_strategies(&adapter, &config).unwrap();

        assert_eq!(strategies.len(), 2);
        assert_eq!(strategies[0].name, "5-bar SMA under");
        assert_eq!(strategies[1].name, "5-bar SMA over");
    }

    #[test]
    fn bad_rule_is_rule_parse_error() {
        let ini = "[strategy]\nentry = OVER(close\nexit = UNDER(close, 1)\n";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let err = cli::build_strategies(&adapter, &BacktestConfig::default()).unwrap_err();
        assert!(matches!(err, BacktestError::RuleParse(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn validation_accepts_valid_ini_file() {
        let file = write_temp_file(".ini", VALID_INI);
        let adapter = cli::load_config(file.path()).unwrap();
        assert!(validate_backtest_config(&adapter).is_ok());
        assert!(validate_strategy_config(&adapter).is_ok());
        assert_eq!(adapter.get_count("backtest", "sma_period", 3).unwrap(), 4);
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let err = cli::load_config(Path::new("/nonexistent/smabacktest.ini")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

mod data_resolution {
    use super::*;

    #[test]
    fn override_wins() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let path = cli::resolve_data_path(
            Some(Path::new("/tmp/other.csv")),
            Some(&adapter),
            Some(Path::new("/etc/app/config.ini")),
        );
        assert_eq!(path, Some(PathBuf::from("/tmp/other.csv")));
    }

    #[test]
    fn relative_csv_path_is_resolved_against_config_dir() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let path = cli::resolve_data_path(None, Some(&adapter), Some(Path::new("/etc/app/config.ini")));
        assert_eq!(path, Some(PathBuf::from("/etc/app/bars.csv")));
    }

    #[test]
    fn absolute_csv_path_is_kept() {
        let adapter = FileConfigAdapter::from_string("[data]\ncsv_path = /data/bars.csv\n").unwrap();
        let path = cli::resolve_data_path(None, Some(&adapter), Some(Path::new("/etc/app/config.ini")));
        assert_eq!(path, Some(PathBuf::from("/data/bars.csv")));
    }

    #[test]
    fn no_data_source_means_sample_series() {
        assert_eq!(cli::resolve_data_path(None, None, None), None);
        let adapter = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        assert_eq!(cli::resolve_data_path(None, Some(&adapter), None), None);
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn demo_report_with_mock_data() {
        let port = MockDataPort::with_series(fixture_series());
        let config = BacktestConfig::default();
        let mut out = Vec::new();

        let result = cli::run_pipeline(
            &port,
            &demo_strategies(&config),
            &config,
            &TextReportAdapter,
            &mut out,
        )
        .unwrap();

        assert_eq!(port.loads.get(), 1);
        assert_eq!(result.runs.len(), 2);
        let text = render(out);
        assert!(text.starts_with("3-bar SMA under\nTrade record (starts with BUY): 3 orders, 1 closed trades\n"));
        assert!(text.contains("  #1 BUY  index=1 price=110 amount=50 -> SELL index=3 price=119 amount=50\n"));
        assert!(text.contains("-- BuyAndHold --\n0.3\n0.3\n\n"));
        assert!(text.contains("-- NumberOfBars --\n8\n8\n\n"));
        assert!(text.contains("-- NumberOfTrades --\n1\n1\n\n"));
    }

    #[test]
    fn criteria_blocks_follow_report_order() {
        let port = MockDataPort::with_series(fixture_series());
        let config = BacktestConfig::default();
        let mut out = Vec::new();
        cli::run_pipeline(&port, &demo_strategies(&config), &config, &TextReportAdapter, &mut out)
            .unwrap();

        let text = render(out);
        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("-- ")).collect();
        assert_eq!(
            headers,
            vec![
                "-- AverageProfitableTrades --",
                "-- AverageProfit --",
                "-- BuyAndHold --",
                "-- LinearTransactionCost --",
                "-- MaximumDrawdown --",
                "-- NumberOfBars --",
                "-- NumberOfTrades --",
                "-- NumberOfBarsInTrades --",
                "-- RewardRiskRatio --",
                "-- TotalProfit --",
                "-- ProfitLoss --",
                "-- VersusBuyAndHold --",
            ]
        );
    }

    #[test]
    fn data_error_propagates() {
        let port = MockDataPort::with_error("connection refused");
        let config = BacktestConfig::default();
        let mut out = Vec::new();

        let err = cli::run_pipeline(&port, &demo_strategies(&config), &config, &TextReportAdapter, &mut out)
            .unwrap_err();
        assert!(matches!(err, BacktestError::Data { .. }));
        assert_eq!(err.exit_code(), 3);
        assert!(out.is_empty());
    }

    #[test]
    fn csv_file_and_ini_file_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let csv_path = dir.path().join("bars.csv");
        std::fs::write(&csv_path, fixture_csv()).unwrap();
        let ini_path = dir.path().join("config.ini");
        std::fs::write(&ini_path, VALID_INI).unwrap();

        let adapter = cli::load_config(&ini_path).unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();
        let strategies = cli::build_strategies(&adapter, &config).unwrap();
        let data_path = cli::resolve_data_path(None, Some(&adapter), Some(&ini_path)).unwrap();
        assert_eq!(data_path, csv_path);

        let mut out = Vec::new();
        let result = cli::run_pipeline(
            &CsvAdapter::new(data_path),
            &strategies,
            &config,
            &TextReportAdapter,
            &mut out,
        )
        .unwrap();

        assert_eq!(result.series_name, "bars");
        assert_eq!(result.bar_count, 8);
        // short threshold strategy: sell at 2 (140), buy back at 4 (100), sell again at 6
        let orders: Vec<usize> = result.runs[0].record.orders().iter().map(|o| o.index).collect();
        assert_eq!(orders, vec![2, 4, 6]);
        let pl = result.criterion("ProfitLoss").unwrap();
        assert_relative_eq!(pl.values[0], 400.0, epsilon = 1e-9);

        let text = render(out);
        assert!(text.starts_with("Threshold\nTrade record (starts with SELL)"));
    }

    #[test]
    fn out_of_order_csv_is_series_error() {
        let content = "timestamp,open,high,low,close,volume\n\
            2018-01-02,1,1,1,1,1\n\
            2018-01-01,1,1,1,1,1\n";
        let file = write_temp_file(".csv", content);
        let config = BacktestConfig::default();
        let mut out = Vec::new();

        let err = cli::run_pipeline(
            &CsvAdapter::new(file.path().to_path_buf()),
            &demo_strategies(&config),
            &config,
            &TextReportAdapter,
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
