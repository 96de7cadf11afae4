//! Trading rules: per-step entry/exit decisions over a trailing price window.

use super::regression::fit_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// A pluggable decision rule. `decide` is a pure function of the trailing
/// window (the `scope` prices ending one step before the current one) and the
/// current price; it never mutates state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradingRule {
    /// Flat band around the rolling mean: buy below
    /// `mean - band_width * std`, sell above `mean + band_width * std`.
    FixedBand { band_width: f64 },
    /// Band around a least-squares trend line fitted over the window,
    /// evaluated at the last window index; the band half-widths are multiples
    /// of the fit's residual standard deviation.
    Tilted { buy_range: f64, sell_range: f64 },
}

impl TradingRule {
    pub const DEFAULT_BAND_WIDTH: f64 = 2.0;

    /// Caller guarantees `window.len() >= 2` (the engine enforces
    /// `scope >= 2` before ever evaluating a rule).
    pub fn decide(&self, window: &[f64], current: f64) -> Signal {
        debug_assert!(window.len() >= 2, "rule window needs at least 2 points");

        let (lower, upper) = match self {
            TradingRule::FixedBand { band_width } => {
                let mean = window.iter().sum::<f64>() / window.len() as f64;
                let sum_sq: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
                let std = (sum_sq / (window.len() - 1) as f64).sqrt();
                (mean - band_width * std, mean + band_width * std)
            }
            TradingRule::Tilted {
                buy_range,
                sell_range,
            } => {
                let fit = fit_line(window);
                let fitted = fit.value_at((window.len() - 1) as f64);
                (
                    fitted - buy_range * fit.residual_std,
                    fitted + sell_range * fit.residual_std,
                )
            }
        };

        if current < lower {
            Signal::Buy
        } else if current > upper {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl Default for TradingRule {
    fn default() -> Self {
        TradingRule::FixedBand {
            band_width: Self::DEFAULT_BAND_WIDTH,
        }
    }
}
