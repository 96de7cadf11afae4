//! Buy-and-hold baseline.
//!
//! Invests the full principal at step `scope` and holds through the end of
//! the slice. Strategies warm up over the first `scope` points before they
//! can trade, so the baseline starts compounding on the same day and the two
//! trajectories compare like for like.

use super::error::MeanrevError;
use super::price_series::PriceSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct BaselineResult {
    pub final_value: f64,
    /// Starts at the principal, then one compounded value per evaluated step.
    pub trajectory: Vec<f64>,
}

pub fn buy_and_hold(
    series: &PriceSeries,
    principal: f64,
    scope: usize,
) -> Result<BaselineResult, MeanrevError> {
    super::backtest::check_history(series, scope)?;

    let closes = series.closes();
    let mut value = principal;
    let mut trajectory = Vec::with_capacity(closes.len() - scope + 1);
    trajectory.push(value);

    for i in scope..closes.len() {
        value *= closes[i] / closes[i - 1];
        trajectory.push(value);
    }

    Ok(BaselineResult {
        final_value: value,
        trajectory,
    })
}
