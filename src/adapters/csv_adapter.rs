//! CSV file price data adapter.
//!
//! Expects one `<TICKER>.csv` per instrument under the base directory, with a
//! header row and `date,close` columns.

use crate::domain::error::MeanrevError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn read_points(&self, ticker: &str) -> Result<Vec<PricePoint>, MeanrevError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(MeanrevError::NoData {
                ticker: ticker.to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| MeanrevError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MeanrevError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| MeanrevError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MeanrevError::Data {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| MeanrevError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| MeanrevError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            points.push(PricePoint { date, close });
        }

        Ok(points)
    }
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MeanrevError> {
        let points = self
            .read_points(ticker)?
            .into_iter()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        Ok(PriceSeries::new(ticker.to_string(), points))
    }

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| MeanrevError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MeanrevError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        let points = match self.read_points(ticker) {
            Ok(p) => p,
            Err(MeanrevError::NoData { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let min = points.iter().map(|p| p.date).min();
        let max = points.iter().map(|p| p.date).max();
        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((min, max, points.len()))),
            _ => Ok(None),
        }
    }
}
