//! Performance summary: strategy versus buy-and-hold.
//!
//! Reported values are rounded to 2 decimal places; everything upstream stays
//! in full precision.

use super::backtest::BacktestResult;
use super::baseline::BaselineResult;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub principal: f64,
    pub baseline_return: f64,
    pub baseline_percent: f64,
    pub strategy_return: f64,
    pub strategy_percent: f64,
    /// Strategy % return divided by the fraction of evaluated steps spent in
    /// the market; 0 when the strategy never entered.
    pub risk_adjusted_percent: f64,
    pub trades: usize,
    /// Wins over losses; 0 when there are no losing closed trades.
    pub win_loss_ratio: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn score(
    strategy: &BacktestResult,
    baseline: &BaselineResult,
    principal: f64,
) -> StrategySummary {
    let strategy_percent = (strategy.final_value / principal - 1.0) * 100.0;
    let baseline_percent = (baseline.final_value / principal - 1.0) * 100.0;

    let evaluated = strategy.evaluated_steps();
    let in_market_fraction = if evaluated > 0 {
        strategy.steps_in_market as f64 / evaluated as f64
    } else {
        0.0
    };
    let risk_adjusted = if in_market_fraction > 0.0 {
        strategy_percent / in_market_fraction
    } else {
        0.0
    };

    let losses = strategy.ledger.trades_opened - strategy.ledger.trades_won;
    let win_loss_ratio = if losses > 0 {
        strategy.ledger.trades_won as f64 / losses as f64
    } else {
        0.0
    };

    StrategySummary {
        principal,
        baseline_return: round2(baseline.final_value),
        baseline_percent: round2(baseline_percent),
        strategy_return: round2(strategy.final_value),
        strategy_percent: round2(strategy_percent),
        risk_adjusted_percent: round2(risk_adjusted),
        trades: strategy.ledger.trades_opened,
        win_loss_ratio: round2(win_loss_ratio),
    }
}
