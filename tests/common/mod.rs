#![allow(dead_code)]

use chrono::NaiveDate;
use meanrev::domain::error::MeanrevError;
use meanrev::domain::price_series::{PricePoint, PriceSeries};
use meanrev::ports::data_port::PriceDataPort;
use std::collections::HashMap;

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.data.insert(ticker.to_string(), make_points(closes));
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MeanrevError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(MeanrevError::Data {
                reason: reason.clone(),
            });
        }
        let points = self
            .data
            .get(ticker)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        Ok(PriceSeries::new(ticker.to_string(), points))
    }

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        match self.data.get(ticker) {
            Some(points) if !points.is_empty() => {
                let min = points.iter().map(|p| p.date).min().unwrap();
                let max = points.iter().map(|p| p.date).max().unwrap();
                Ok(Some((min, max, points.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily points starting at 2024-01-01.
pub fn make_points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(ticker.to_string(), make_points(closes))
}
