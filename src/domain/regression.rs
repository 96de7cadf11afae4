//! Ordinary least-squares line fit over a fixed-size price window.
//!
//! Stateless closed-form solve: x is the window index 0..n-1, y the prices.
//! No estimator object persists across windows.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Sample standard deviation of the fit residuals (divisor n-1).
    pub residual_std: f64,
}

impl LinearFit {
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit `window` against indices 0..n-1. Caller guarantees `window.len() >= 2`.
pub fn fit_line(window: &[f64]) -> LinearFit {
    debug_assert!(window.len() >= 2, "regression window needs at least 2 points");

    let n = window.len() as f64;
    let sum_x: f64 = (0..window.len()).map(|x| x as f64).sum();
    let sum_x2: f64 = (0..window.len()).map(|x| (x * x) as f64).sum();
    let sum_y: f64 = window.iter().sum();
    let sum_xy: f64 = window.iter().enumerate().map(|(x, y)| x as f64 * y).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = if denominator != 0.0 {
        (n * sum_xy - sum_x * sum_y) / denominator
    } else {
        0.0
    };
    let intercept = sum_y / n - slope * (sum_x / n);

    let residual_sq_sum: f64 = window
        .iter()
        .enumerate()
        .map(|(x, y)| {
            let r = y - (intercept + slope * x as f64);
            r * r
        })
        .sum();
    let residual_std = (residual_sq_sum / (n - 1.0)).sqrt();

    LinearFit {
        slope,
        intercept,
        residual_std,
    }
}
