//! Price data access port trait.

use crate::domain::error::MeanrevError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Daily closes for one ticker within `[start, end]`. An empty series is
    /// a valid return; callers must treat it as "no data", never backtest it.
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MeanrevError>;

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError>;

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError>;
}
