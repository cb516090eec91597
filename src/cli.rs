//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::{CsvAdapter, DEFAULT_PRICE_COLUMN};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::account::DEFAULT_STARTING_BALANCE;
use crate::domain::backtest::{
    run_buy_and_hold_batch, run_mac_batch, BacktestConfig, BatchSummary, Universe,
    DEFAULT_WINDOWS,
};
use crate::domain::config_validation::{
    parse_window_overrides, validate_backtest_config, validate_strategy_config,
    validate_universe_config, DEFAULT_PAIRS, DEFAULT_THETAS, DEFAULT_WINDOW_OVERRIDES,
};
use crate::domain::error::FxBacktestError;
use crate::domain::profit::{CostModel, DEFAULT_FIXED_COST_RATE, DEFAULT_SIZE_MULTIPLIER};
use crate::domain::signal::{MacParams, DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD};
use crate::ports::config_port::ConfigPort;

/// Exit code when every run of a batch failed.
const ALL_RUNS_FAILED: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "fxbacktest", about = "Currency-pair strategy benchmarking")]
pub struct Cli {
    /// Log per-trade detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the moving-average crossover backtest
    Mac {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        pair: Option<String>,
        #[arg(long)]
        theta: Option<String>,
    },
    /// Run the buy-and-hold benchmark
    BuyAndHold {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        pair: Option<String>,
    },
    /// Run buy-and-hold, then the crossover backtest
    RunAll {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration and print the run plan
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Paths used by the file adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct IoPaths {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub price_column: String,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Mac {
            config,
            pair,
            theta,
        } => run_batch(&config, pair.as_deref(), theta.as_deref(), true, false),
        Command::BuyAndHold { config, pair } => {
            run_batch(&config, pair.as_deref(), None, false, true)
        }
        Command::RunAll { config } => run_batch(&config, None, None, true, true),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, FxBacktestError> {
    FileConfigAdapter::from_file(path).map_err(|e| FxBacktestError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), FxBacktestError> {
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;
    validate_universe_config(config)?;
    Ok(())
}

pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, FxBacktestError> {
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;

    Ok(BacktestConfig {
        starting_balance: config.get_double(
            "backtest",
            "starting_balance",
            DEFAULT_STARTING_BALANCE,
        ),
        costs: CostModel {
            fixed_cost_rate: config.get_double(
                "backtest",
                "fixed_cost_rate",
                DEFAULT_FIXED_COST_RATE,
            ),
            size_multiplier: config.get_double(
                "backtest",
                "size_multiplier",
                DEFAULT_SIZE_MULTIPLIER,
            ),
        },
        params: MacParams {
            fast_period: config.get_int("strategy", "fast_period", DEFAULT_FAST_PERIOD as i64)
                as usize,
            slow_period: config.get_int("strategy", "slow_period", DEFAULT_SLOW_PERIOD as i64)
                as usize,
        },
    })
}

pub fn build_universe(config: &dyn ConfigPort) -> Result<Universe, FxBacktestError> {
    validate_universe_config(config)?;

    let pairs = config
        .get_list("universe", "pairs")
        .unwrap_or_else(|| split_defaults(DEFAULT_PAIRS))
        .into_iter()
        .map(|p| p.to_uppercase())
        .collect();
    let thetas: Vec<String> = config
        .get_list("universe", "thetas")
        .unwrap_or_else(|| split_defaults(DEFAULT_THETAS));
    let overrides = config
        .get_string("universe", "window_overrides")
        .unwrap_or_else(|| DEFAULT_WINDOW_OVERRIDES.to_string());
    let benchmark_theta = config
        .get_string("universe", "benchmark_theta")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| thetas.first().cloned().unwrap_or_default());

    Ok(Universe {
        pairs,
        thetas,
        default_windows: config.get_int("universe", "windows", DEFAULT_WINDOWS as i64) as usize,
        window_overrides: parse_window_overrides(&overrides)?.into_iter().collect(),
        benchmark_theta,
    })
}

pub fn build_io_paths(config: &dyn ConfigPort) -> IoPaths {
    IoPaths {
        data_dir: PathBuf::from(
            config
                .get_string("backtest", "data_dir")
                .unwrap_or_else(|| "./TransformedData".to_string()),
        ),
        results_dir: PathBuf::from(
            config
                .get_string("backtest", "results_dir")
                .unwrap_or_else(|| "./Results".to_string()),
        ),
        price_column: config
            .get_string("backtest", "price_column")
            .unwrap_or_else(|| DEFAULT_PRICE_COLUMN.to_string()),
    }
}

fn split_defaults(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Load and validate the config, then run the requested batches.
pub fn execute(
    config_path: &Path,
    pair: Option<&str>,
    theta: Option<&str>,
    mac: bool,
    buy_and_hold: bool,
) -> Result<BatchSummary, FxBacktestError> {
    info!(path = %config_path.display(), "loading config");
    let adapter = load_config(config_path)?;
    let config = build_backtest_config(&adapter)?;
    let universe = build_universe(&adapter)?.filtered(pair, theta);
    let paths = build_io_paths(&adapter);

    let data_port = CsvAdapter::new(paths.data_dir).with_price_column(&paths.price_column);
    let report_port = JsonReportAdapter::new(paths.results_dir);

    let mut summary = BatchSummary::default();
    if buy_and_hold {
        run_buy_and_hold_batch(&data_port, &report_port, &universe, &config, &mut summary);
    }
    if mac {
        run_mac_batch(&data_port, &report_port, &universe, &config, &mut summary);
    }
    Ok(summary)
}

fn run_batch(
    config_path: &Path,
    pair: Option<&str>,
    theta: Option<&str>,
    mac: bool,
    buy_and_hold: bool,
) -> ExitCode {
    let summary = match execute(config_path, pair, theta, mac, buy_and_hold) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    print_summary(&summary);

    if summary.all_failed() {
        error!(failures = summary.failures.len(), "every run failed");
        return ExitCode::from(ALL_RUNS_FAILED);
    }
    ExitCode::SUCCESS
}

pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for run in &summary.buy_and_hold_runs {
        lines.push(format!("{}: {:.2}%", run.pair, run.report.return_pct));
    }
    for run in &summary.mac_runs {
        lines.push(format!(
            "{} @ {} Total Return: {:.2}% Final Balance: {:.2}",
            run.pair,
            run.theta,
            run.report.return_pct,
            run.final_balance()
        ));
    }
    for failure in &summary.failures {
        match &failure.theta {
            Some(theta) => lines.push(format!("{} @ {} FAILED: {}", failure.pair, theta, failure.error)),
            None => lines.push(format!("{} FAILED: {}", failure.pair, failure.error)),
        }
    }
    lines
}

fn print_summary(summary: &BatchSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    if let Err(e) = validate_config(&adapter) {
        error!("{e}");
        return (&e).into();
    }

    let (config, universe) = match build_backtest_config(&adapter)
        .and_then(|c| build_universe(&adapter).map(|u| (c, u)))
    {
        Ok(pair) => pair,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };
    let paths = build_io_paths(&adapter);

    println!("Configuration is valid.");
    println!("\nBacktest:");
    println!("  starting balance: {}", config.starting_balance);
    println!("  fixed cost rate:  {}", config.costs.fixed_cost_rate);
    println!("  size multiplier:  {}", config.costs.size_multiplier);
    println!(
        "  moving averages:  SMA({}) / SMA({})",
        config.params.fast_period, config.params.slow_period
    );
    println!("\nData:");
    println!("  input:   {} (column {})", paths.data_dir.display(), paths.price_column);
    println!("  results: {}", paths.results_dir.display());
    println!("\nUniverse:");
    for pair in &universe.pairs {
        println!("  {}: {} windows", pair, universe.window_count(pair));
    }
    println!("  thetas: {}", universe.thetas.join(", "));
    println!("  benchmark theta: {}", universe.benchmark_theta);
    ExitCode::SUCCESS
}
