//! Walk-forward backtest engine.
//!
//! One run is a single pass over a price slice: the first `scope` points are
//! warm-up only, every later step updates the investment (when in the market),
//! appends one trajectory value, and asks the rule for a decision on the
//! trailing window ending at the previous step.

use chrono::NaiveDate;

use super::error::MeanrevError;
use super::price_series::PriceSeries;
use super::rule::{Signal, TradingRule};

/// Minimum trailing window a rule can evaluate.
pub const MIN_SCOPE: usize = 2;

/// An open position: set while in the market, cleared on exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub entry_index: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
}

/// A completed round trip. `won` compares the exit price against this
/// position's own entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedTrade {
    pub entry_index: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_index: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub won: bool,
}

/// Trade accounting for one run. Counters only ever increase while the
/// engine walks forward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLedger {
    pub trades_opened: usize,
    pub trades_won: usize,
    pub closed: Vec<ClosedTrade>,
}

impl TradeLedger {
    fn open(&mut self) {
        self.trades_opened += 1;
    }

    fn close(&mut self, trade: ClosedTrade) {
        if trade.won {
            self.trades_won += 1;
        }
        self.closed.push(trade);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub final_value: f64,
    /// One value per evaluated step: the running investment while in the
    /// market, `0.0` while parked. Index-aligned with the evaluated
    /// sub-slice (offset by `scope`).
    pub trajectory: Vec<f64>,
    pub steps_in_market: usize,
    pub ledger: TradeLedger,
    /// A position still open when the slice ran out; marked to market
    /// through the final step but not counted as a win or loss.
    pub open_position: Option<Position>,
}

impl BacktestResult {
    pub fn evaluated_steps(&self) -> usize {
        self.trajectory.len()
    }
}

pub fn check_history(
    series: &PriceSeries,
    scope: usize,
) -> Result<(), MeanrevError> {
    if series.is_empty() {
        return Err(MeanrevError::NoData {
            ticker: series.ticker().to_string(),
        });
    }
    if scope < MIN_SCOPE || scope >= series.len() {
        return Err(MeanrevError::InsufficientHistory {
            ticker: series.ticker().to_string(),
            points: series.len(),
            scope,
        });
    }
    Ok(())
}

/// Run one full simulation of `rule` over `series` with `principal` invested
/// whenever the rule is in the market.
///
/// Deterministic: identical inputs produce bit-identical results.
pub fn run_backtest(
    series: &PriceSeries,
    principal: f64,
    scope: usize,
    rule: &TradingRule,
) -> Result<BacktestResult, MeanrevError> {
    check_history(series, scope)?;

    let closes = series.closes();
    let mut investment = principal;
    let mut trajectory = Vec::with_capacity(closes.len() - scope);
    let mut steps_in_market = 0usize;
    let mut ledger = TradeLedger::default();
    let mut position: Option<Position> = None;

    for i in scope..closes.len() {
        let window = &closes[i - scope..i];
        let current = closes[i];

        if let Some(open) = position {
            steps_in_market += 1;
            investment *= current / closes[i - 1];
            trajectory.push(investment);

            if rule.decide(window, current) == Signal::Sell {
                ledger.close(ClosedTrade {
                    entry_index: open.entry_index,
                    entry_date: open.entry_date,
                    entry_price: open.entry_price,
                    exit_index: i,
                    exit_date: series.date(i),
                    exit_price: current,
                    won: current > open.entry_price,
                });
                position = None;
            }
        } else {
            trajectory.push(0.0);

            if rule.decide(window, current) == Signal::Buy {
                position = Some(Position {
                    entry_index: i,
                    entry_date: series.date(i),
                    entry_price: current,
                });
                ledger.open();
            }
        }
    }

    Ok(BacktestResult {
        final_value: investment,
        trajectory,
        steps_in_market,
        ledger,
        open_position: position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        PriceSeries::new("TEST".into(), points)
    }

    fn fixed_band() -> TradingRule {
        TradingRule::FixedBand { band_width: 2.0 }
    }

    #[test]
    fn empty_series_refused() {
        let series = make_series(&[]);
        let result = run_backtest(&series, 100.0, 3, &fixed_band());
        assert!(matches!(result, Err(MeanrevError::NoData { .. })));
    }

    #[test]
    fn scope_not_smaller_than_slice_refused() {
        let series = make_series(&[100.0, 101.0, 102.0]);
        let result = run_backtest(&series, 100.0, 3, &fixed_band());
        assert!(matches!(
            result,
            Err(MeanrevError::InsufficientHistory { points: 3, scope: 3, .. })
        ));
    }

    #[test]
    fn scope_below_minimum_refused() {
        let series = make_series(&[100.0, 101.0, 102.0, 103.0]);
        let result = run_backtest(&series, 100.0, 1, &fixed_band());
        assert!(matches!(
            result,
            Err(MeanrevError::InsufficientHistory { scope: 1, .. })
        ));
    }

    #[test]
    fn constant_series_never_trades() {
        let series = make_series(&[100.0; 40]);
        let result = run_backtest(&series, 100.0, 30, &fixed_band()).unwrap();

        assert!((result.final_value - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.steps_in_market, 0);
        assert_eq!(result.ledger.trades_opened, 0);
        assert_eq!(result.ledger.trades_won, 0);
        assert!(result.open_position.is_none());
        assert_eq!(result.trajectory, vec![0.0; 10]);
    }

    #[test]
    fn known_entry_and_exit_indices() {
        // window at i=3 is [100, 90, 80]: mean 90, std 10, buy below 70.
        // 65 triggers entry; the next day's 130 is far above the sell band.
        let series = make_series(&[100.0, 90.0, 80.0, 65.0, 130.0, 100.0, 100.0, 100.0]);
        let result = run_backtest(&series, 100.0, 3, &fixed_band()).unwrap();

        assert_eq!(result.ledger.trades_opened, 1);
        assert_eq!(result.ledger.trades_won, 1);
        assert_eq!(result.ledger.closed.len(), 1);

        let trade = &result.ledger.closed[0];
        assert_eq!(trade.entry_index, 3);
        assert_eq!(trade.exit_index, 4);
        assert!((trade.entry_price - 65.0).abs() < f64::EPSILON);
        assert!((trade.exit_price - 130.0).abs() < f64::EPSILON);
        assert!(trade.won);

        // invested at 65, marked to 130: the principal doubles
        assert!((result.final_value - 200.0).abs() < 1e-9);
        assert_eq!(result.steps_in_market, 1);
        assert_eq!(result.trajectory, vec![0.0, 200.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn losing_exit_is_not_a_win() {
        // enter at 65 (i=3), then crash; the window decays with the price,
        // so the bounce to 45 clears the sell band (window [30, 20, 10]:
        // mean 20, std 10, sell above 40) while still under the 65 entry
        let series = make_series(&[100.0, 90.0, 80.0, 65.0, 30.0, 20.0, 10.0, 45.0]);
        let result = run_backtest(&series, 100.0, 3, &fixed_band()).unwrap();

        assert_eq!(result.ledger.trades_opened, 1);
        assert_eq!(result.ledger.trades_won, 0);

        let trade = &result.ledger.closed[0];
        assert_eq!(trade.entry_index, 3);
        assert_eq!(trade.exit_index, 7);
        assert!(!trade.won);
    }

    #[test]
    fn position_open_at_end_stays_open() {
        // entry at i=3, no sell trigger afterwards
        let series = make_series(&[100.0, 90.0, 80.0, 65.0, 66.0, 64.0, 65.0]);
        let result = run_backtest(&series, 100.0, 3, &fixed_band()).unwrap();

        assert_eq!(result.ledger.trades_opened, 1);
        assert_eq!(result.ledger.closed.len(), 0);
        assert_eq!(result.ledger.trades_won, 0);

        let open = result.open_position.expect("position should still be open");
        assert_eq!(open.entry_index, 3);

        // marked to market through the final step: 100 * 65/65
        assert!((result.final_value - 100.0).abs() < 1e-9);
        assert_eq!(result.steps_in_market, 3);
    }

    #[test]
    fn tilted_rule_enters_on_dip_below_trend() {
        // window [100, 101, 102] fits exactly: fitted 102, residual std 0.
        // 101 dips below the trend line, the spike to 200 exits.
        let series = make_series(&[100.0, 101.0, 102.0, 101.0, 200.0, 200.0]);
        let rule = TradingRule::Tilted {
            buy_range: 2.0,
            sell_range: 2.0,
        };
        let result = run_backtest(&series, 100.0, 3, &rule).unwrap();

        assert_eq!(result.ledger.trades_opened, 1);
        let trade = &result.ledger.closed[0];
        assert_eq!(trade.entry_index, 3);
        assert_eq!(trade.exit_index, 4);
        assert!(trade.won);
    }

    #[test]
    fn reruns_are_bit_identical() {
        let series = make_series(&[100.0, 90.0, 80.0, 65.0, 130.0, 100.0, 95.0, 105.0]);
        let rule = TradingRule::Tilted {
            buy_range: 1.5,
            sell_range: 2.5,
        };

        let first = run_backtest(&series, 250.0, 3, &rule).unwrap();
        let second = run_backtest(&series, 250.0, 3, &rule).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.final_value.to_bits(), second.final_value.to_bits());
    }

    #[test]
    fn trajectory_length_matches_evaluated_steps() {
        let series = make_series(&[100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0]);
        let result = run_backtest(&series, 100.0, 4, &fixed_band()).unwrap();
        assert_eq!(result.trajectory.len(), 3);
        assert_eq!(result.evaluated_steps(), 3);
    }
}
