//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::chart_svg::render_comparison_chart;
use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::adapters::ticker_file_adapter::FileTickerAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::baseline::buy_and_hold;
use crate::domain::batch::run_performance_analysis;
use crate::domain::config_validation::{
    validate_backtest_config, validate_batch_config, validate_data_config,
    validate_strategy_config, RULE_TILTED,
};
use crate::domain::error::MeanrevError;
use crate::domain::period::{parse_periods, Period, DEFAULT_PRINCIPAL};
use crate::domain::rule::TradingRule;
use crate::domain::scoring::score;
use crate::domain::statistics;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::{ReportContext, ReportPort};
use crate::ports::ticker_port::TickerListPort;

#[derive(Parser, Debug)]
#[command(name = "meanrev", about = "Mean-reversion strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest one ticker against the buy-and-hold baseline
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        /// Write the metric table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write an SVG comparison chart to this file
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Sweep the configured rule across a ticker range and period list
    Batch {
        #[arg(short, long)]
        config: PathBuf,
        /// CSV output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Price and return statistics for one ticker
    Stats {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Show the ranked ticker universe
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 0)]
        from: usize,
        #[arg(long, default_value_t = 50)]
        to: usize,
    },
    /// Show data range for ticker(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Validate a configuration file without running anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            ticker,
            output,
            chart,
        } => run_backtest_cmd(&config, ticker.as_deref(), output.as_ref(), chart.as_ref()),
        Command::Batch { config, output } => run_batch(&config, output.as_ref()),
        Command::Stats { config, ticker } => run_stats(&config, ticker.as_deref()),
        Command::ListTickers { config, from, to } => run_list_tickers(&config, from, to),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = MeanrevError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_period(config: &dyn ConfigPort) -> Result<Period, MeanrevError> {
    let start_str =
        config
            .get_string("backtest", "start_date")
            .ok_or_else(|| MeanrevError::ConfigMissing {
                section: "backtest".into(),
                key: "start_date".into(),
            })?;
    let end_str =
        config
            .get_string("backtest", "end_date")
            .ok_or_else(|| MeanrevError::ConfigMissing {
                section: "backtest".into(),
                key: "end_date".into(),
            })?;

    let start = chrono::NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        MeanrevError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;
    let end = chrono::NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
        MeanrevError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    Period::new(
        start,
        end,
        config.get_double("backtest", "principal", DEFAULT_PRINCIPAL),
    )
}

pub fn build_rule(config: &dyn ConfigPort) -> TradingRule {
    let name = config
        .get_string("strategy", "rule")
        .unwrap_or_default();

    if name.trim() == RULE_TILTED {
        TradingRule::Tilted {
            buy_range: config.get_double("strategy", "buy_range", 2.0),
            sell_range: config.get_double("strategy", "sell_range", 2.0),
        }
    } else {
        TradingRule::FixedBand {
            band_width: config.get_double("strategy", "band_width", 2.0),
        }
    }
}

pub fn rule_name(rule: &TradingRule) -> &'static str {
    match rule {
        TradingRule::FixedBand { .. } => "fixed_band",
        TradingRule::Tilted { .. } => "tilted",
    }
}

pub fn resolve_tickers(ticker_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(t) = ticker_override {
        return vec![t.to_uppercase()];
    }

    if let Some(tickers_str) = config.get_string("backtest", "tickers") {
        return tickers_str
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(ticker) = config.get_string("backtest", "ticker") {
        let ticker = ticker.trim().to_uppercase();
        if !ticker.is_empty() {
            return vec![ticker];
        }
    }

    vec![]
}

fn price_adapter(config: &dyn ConfigPort) -> Result<CsvPriceAdapter, MeanrevError> {
    let dir = config
        .get_string("data", "price_dir")
        .ok_or_else(|| MeanrevError::ConfigMissing {
            section: "data".into(),
            key: "price_dir".into(),
        })?;
    Ok(CsvPriceAdapter::new(PathBuf::from(dir)))
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    output_path: Option<&PathBuf>,
    chart_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validation in [
        validate_data_config(&config),
        validate_backtest_config(&config),
        validate_strategy_config(&config),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let period = match build_period(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let rule = build_rule(&config);
    let scope = config.get_int("backtest", "scope", 30) as usize;

    let tickers = resolve_tickers(ticker_override, &config);
    let ticker = match tickers.first() {
        Some(t) => t.clone(),
        None => {
            eprintln!("error: no ticker configured");
            return ExitCode::from(2);
        }
    };

    let data_port = match price_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running backtest: {} {} [rule {}, scope {}]",
        ticker,
        period.label(),
        rule_name(&rule),
        scope,
    );

    let series = match data_port.fetch_closes(&ticker, period.start, period.end) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let strategy = match run_backtest(&series, period.principal, scope, &rule) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let baseline = match buy_and_hold(&series, period.principal, scope) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let summary = score(&strategy, &baseline, period.principal);

    let ctx = ReportContext {
        ticker: &ticker,
        period: &period,
        scope,
        rule_name: rule_name(&rule),
        summary: &summary,
        strategy_trajectory: &strategy.trajectory,
        baseline_trajectory: &baseline.trajectory,
    };

    eprint!("\n{}", TextReportAdapter::format(&ctx));

    if let Some(path) = output_path {
        if let Err(e) = TextReportAdapter.write(&ctx, path) {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {}", path.display());
    }

    if let Some(path) = chart_path {
        let svg = render_comparison_chart(&strategy.trajectory, &baseline.trajectory);
        if let Err(e) = std::fs::write(path, svg) {
            eprintln!("error: failed to write chart: {e}");
            return ExitCode::from(1);
        }
        eprintln!("Chart written to: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_batch(config_path: &PathBuf, output_path: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validation in [
        validate_data_config(&config),
        validate_backtest_config(&config),
        validate_strategy_config(&config),
        validate_batch_config(&config),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let rule = build_rule(&config);
    let scope = config.get_int("backtest", "scope", 30) as usize;
    let principal = config.get_double("backtest", "principal", DEFAULT_PRINCIPAL);

    // explicit period list, or the single backtest period as fallback
    let periods = match config.get_string("batch", "periods") {
        Some(list) => match parse_periods(&list, principal) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => match build_period(&config) {
            Ok(p) => vec![p],
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    let tickers = match batch_tickers(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    let data_port = match price_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running batch: {} tickers x {} periods [rule {}, scope {}]",
        tickers.len(),
        periods.len(),
        rule_name(&rule),
        scope,
    );

    let outcome = run_performance_analysis(&data_port, &tickers, &periods, scope, &rule);

    eprintln!(
        "Completed {} runs ({} skipped)",
        outcome.rows.len(),
        outcome.skipped.len(),
    );

    let write_result = match output_path {
        Some(path) => write_batch_csv(&outcome.rows, csv::Writer::from_path(path)),
        None => write_batch_csv(&outcome.rows, Ok(csv::Writer::from_writer(std::io::stdout()))),
    };

    match write_result {
        Ok(()) => {
            if let Some(path) = output_path {
                eprintln!("Results written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write results: {e}");
            (&e).into()
        }
    }
}

fn batch_tickers(config: &dyn ConfigPort) -> Result<Vec<String>, MeanrevError> {
    // a configured tickers file takes priority over inline ticker lists
    if let Some(path) = config.get_string("data", "tickers_file") {
        let from = config.get_int("batch", "ticker_from", 0).max(0) as usize;
        let to = config.get_int("batch", "ticker_to", 50).max(0) as usize;
        let adapter = FileTickerAdapter::new(PathBuf::from(path));
        return adapter.tickers(from, to);
    }
    Ok(resolve_tickers(None, config))
}

fn write_batch_csv<W: std::io::Write>(
    rows: &[crate::domain::batch::BatchRow],
    writer: Result<csv::Writer<W>, csv::Error>,
) -> Result<(), MeanrevError> {
    let to_data_err = |e: csv::Error| MeanrevError::Data {
        reason: format!("CSV write error: {}", e),
    };

    let mut wtr = writer.map_err(to_data_err)?;

    wtr.write_record([
        "ticker",
        "period",
        "bah_return",
        "bah_percent",
        "strat_return",
        "strat_percent",
        "risk_adj_percent",
        "trades",
        "win_loss_ratio",
    ])
    .map_err(to_data_err)?;

    for row in rows {
        let s = &row.summary;
        wtr.write_record([
            row.ticker.clone(),
            row.period_label.clone(),
            format!("{:.2}", s.baseline_return),
            format!("{:.2}", s.baseline_percent),
            format!("{:.2}", s.strategy_return),
            format!("{:.2}", s.strategy_percent),
            format!("{:.2}", s.risk_adjusted_percent),
            s.trades.to_string(),
            format!("{:.2}", s.win_loss_ratio),
        ])
        .map_err(to_data_err)?;
    }

    wtr.flush()?;
    Ok(())
}

fn run_stats(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validation in [validate_data_config(&config), validate_backtest_config(&config)] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let period = match build_period(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(ticker_override, &config);
    let ticker = match tickers.first() {
        Some(t) => t.clone(),
        None => {
            eprintln!("error: no ticker configured");
            return ExitCode::from(2);
        }
    };

    let data_port = match price_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match data_port.fetch_closes(&ticker, period.start, period.end) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if series.is_empty() {
        let err = MeanrevError::NoData { ticker };
        eprintln!("error: {err}");
        return (&err).into();
    }

    println!("{} {} ({} points)", ticker, period.label(), series.len());

    let fmt = |v: Option<f64>| match v {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    };

    println!("  mean price:          {}", fmt(statistics::mean(&series)));
    println!("  price variance:      {}", fmt(statistics::variance(&series)));
    println!("  price std:           {}", fmt(statistics::std(&series)));
    println!(
        "  percent return:      {}",
        fmt(statistics::percent_return(&series, period.principal))
    );
    println!(
        "  mean of returns:     {}",
        fmt(statistics::mean_of_returns(&series, period.principal))
    );
    println!(
        "  std of returns:      {}",
        fmt(statistics::std_of_returns(&series, period.principal))
    );

    ExitCode::SUCCESS
}

fn run_list_tickers(config_path: &PathBuf, from: usize, to: usize) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let path = match config.get_string("data", "tickers_file") {
        Some(p) => p,
        None => {
            let err = MeanrevError::ConfigMissing {
                section: "data".into(),
                key: "tickers_file".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let adapter = FileTickerAdapter::new(PathBuf::from(path));
    match adapter.tickers(from, to) {
        Ok(tickers) => {
            if tickers.is_empty() {
                eprintln!("No tickers in range {}..{}", from, to);
            } else {
                for ticker in &tickers {
                    println!("{}", ticker);
                }
                eprintln!("{} tickers", tickers.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_port = match price_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(ticker_override, &config);
    if tickers.is_empty() {
        eprintln!("error: no ticker configured");
        return ExitCode::from(2);
    }

    for ticker in &tickers {
        match data_port.data_range(ticker) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} points, {} to {}", ticker, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", ticker);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", ticker, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    for validation in [
        validate_data_config(&config),
        validate_backtest_config(&config),
        validate_strategy_config(&config),
        validate_batch_config(&config),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let rule = build_rule(&config);
    eprintln!("\nStrategy:");
    match rule {
        TradingRule::FixedBand { band_width } => {
            eprintln!("  rule: fixed_band (band_width {})", band_width);
        }
        TradingRule::Tilted {
            buy_range,
            sell_range,
        } => {
            eprintln!(
                "  rule: tilted (buy_range {}, sell_range {})",
                buy_range, sell_range
            );
        }
    }
    eprintln!("  scope: {}", config.get_int("backtest", "scope", 30));

    let tickers = resolve_tickers(None, &config);
    eprintln!("\nUniverse:");
    eprintln!("  tickers: {}", tickers.join(", "));

    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}
