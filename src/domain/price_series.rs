//! Daily-close price series representation.

use chrono::NaiveDate;

use super::period::{Period, DEFAULT_PRINCIPAL};

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// An ordered sequence of daily closes for one instrument.
///
/// Dates are strictly increasing once constructed; the constructor sorts its
/// input and drops repeated dates (first occurrence wins).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { ticker, points }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn date(&self, index: usize) -> NaiveDate {
        self.points[index].date
    }

    pub fn close(&self, index: usize) -> f64 {
        self.points[index].close
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// The full available range with the default principal, for callers that
    /// did not specify a period. `None` when the series is empty.
    pub fn default_period(&self) -> Option<Period> {
        let start = self.first_date()?;
        let end = self.last_date()?;
        Period::new(start, end, DEFAULT_PRINCIPAL).ok()
    }

    /// Sub-series within `[start, end]`, both bounds inclusive.
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .cloned()
            .collect();
        PriceSeries {
            ticker: self.ticker.clone(),
            points,
        }
    }
}
