//! Batch performance analysis: one rule configuration swept across a ticker
//! universe and a list of evaluation periods.
//!
//! Tickers with missing or insufficient data are skipped with a warning and
//! excluded from the table; a failed run never aborts the batch.

use super::backtest::run_backtest;
use super::baseline::buy_and_hold;
use super::period::Period;
use super::rule::TradingRule;
use super::scoring::{score, StrategySummary};
use crate::ports::data_port::PriceDataPort;

#[derive(Debug, Clone)]
pub struct BatchRow {
    pub ticker: String,
    pub period_label: String,
    pub summary: StrategySummary,
}

#[derive(Debug, Clone)]
pub struct SkippedRun {
    pub ticker: String,
    pub period_label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub rows: Vec<BatchRow>,
    pub skipped: Vec<SkippedRun>,
}

pub fn run_performance_analysis(
    data_port: &dyn PriceDataPort,
    tickers: &[String],
    periods: &[Period],
    scope: usize,
    rule: &TradingRule,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for ticker in tickers {
        for period in periods {
            let label = period.label();

            let series = match data_port.fetch_closes(ticker, period.start, period.end) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("warning: skipping {} ({}): {}", ticker, label, e);
                    outcome.skipped.push(SkippedRun {
                        ticker: ticker.clone(),
                        period_label: label,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let strategy = match run_backtest(&series, period.principal, scope, rule) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("warning: skipping {} ({}): {}", ticker, label, e);
                    outcome.skipped.push(SkippedRun {
                        ticker: ticker.clone(),
                        period_label: label,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // the engine already validated the slice, so this cannot fail
            let baseline = match buy_and_hold(&series, period.principal, scope) {
                Ok(b) => b,
                Err(e) => {
                    outcome.skipped.push(SkippedRun {
                        ticker: ticker.clone(),
                        period_label: label,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            outcome.rows.push(BatchRow {
                ticker: ticker.clone(),
                period_label: label,
                summary: score(&strategy, &baseline, period.principal),
            });
        }
    }

    outcome
}
