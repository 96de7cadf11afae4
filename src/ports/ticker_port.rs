//! Instrument list port trait.

use crate::domain::error::MeanrevError;

/// An ordered instrument listing (e.g. ranked by market cap) with an
/// index-range selector.
pub trait TickerListPort {
    /// Tickers in rank order from index `from` (inclusive) to `to`
    /// (exclusive). Out-of-range bounds clamp to the list length.
    fn tickers(&self, from: usize, to: usize) -> Result<Vec<String>, MeanrevError>;
}
