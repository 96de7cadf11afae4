//! Price and return statistics over a [`PriceSeries`].
//!
//! All dispersion measures are sample statistics (divisor n-1). Inputs too
//! short to support a measure yield `None` rather than NaN.

use super::price_series::PriceSeries;

pub fn mean(series: &PriceSeries) -> Option<f64> {
    mean_of(&series.closes())
}

pub fn variance(series: &PriceSeries) -> Option<f64> {
    variance_of(&series.closes())
}

pub fn std(series: &PriceSeries) -> Option<f64> {
    variance(series).map(f64::sqrt)
}

/// The series scaled so its first value equals `principal`: the value over
/// time of investing `principal` at the first point and holding.
pub fn normalized_returns(series: &PriceSeries, principal: f64) -> Vec<f64> {
    let closes = series.closes();
    match closes.first() {
        Some(&first) if first != 0.0 => closes.iter().map(|c| c / first * principal).collect(),
        _ => Vec::new(),
    }
}

pub fn final_return(series: &PriceSeries, principal: f64) -> Option<f64> {
    normalized_returns(series, principal).last().copied()
}

pub fn profit(series: &PriceSeries, principal: f64) -> Option<f64> {
    final_return(series, principal).map(|last| last - principal)
}

pub fn percent_return(series: &PriceSeries, principal: f64) -> Option<f64> {
    profit(series, principal).map(|p| p / principal * 100.0)
}

/// Step-over-step percentage changes scaled by `principal`.
pub fn step_returns(series: &PriceSeries, principal: f64) -> Vec<f64> {
    series
        .closes()
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] * principal)
        .collect()
}

pub fn mean_of_returns(series: &PriceSeries, principal: f64) -> Option<f64> {
    mean_of(&step_returns(series, principal))
}

pub fn variance_of_returns(series: &PriceSeries, principal: f64) -> Option<f64> {
    variance_of(&step_returns(series, principal))
}

pub fn std_of_returns(series: &PriceSeries, principal: f64) -> Option<f64> {
    variance_of_returns(series, principal).map(f64::sqrt)
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn variance_of(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean_of(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}
