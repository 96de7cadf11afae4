//! Evaluation period: date bounds plus initial notional.

use chrono::NaiveDate;

use super::error::MeanrevError;

pub const DEFAULT_PRINCIPAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub principal: f64,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate, principal: f64) -> Result<Self, MeanrevError> {
        if start > end {
            return Err(MeanrevError::PeriodInvalid {
                reason: format!("start {} is after end {}", start, end),
            });
        }
        if principal <= 0.0 {
            return Err(MeanrevError::PeriodInvalid {
                reason: format!("principal must be positive, got {}", principal),
            });
        }
        Ok(Self {
            start,
            end,
            principal,
        })
    }

    pub fn label(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

/// Parse a comma-separated period list of the form
/// `2004-01-02..2014-01-01,2014-01-02..2024-01-01`, all sharing one principal.
pub fn parse_periods(input: &str, principal: f64) -> Result<Vec<Period>, MeanrevError> {
    let mut periods = Vec::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(MeanrevError::PeriodInvalid {
                reason: "empty token in period list".into(),
            });
        }

        let (start_str, end_str) =
            trimmed
                .split_once("..")
                .ok_or_else(|| MeanrevError::PeriodInvalid {
                    reason: format!("expected START..END, got '{}'", trimmed),
                })?;

        let start = parse_date(start_str.trim())?;
        let end = parse_date(end_str.trim())?;
        periods.push(Period::new(start, end, principal)?);
    }

    Ok(periods)
}

fn parse_date(value: &str) -> Result<NaiveDate, MeanrevError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| MeanrevError::PeriodInvalid {
        reason: format!("invalid date '{}', expected YYYY-MM-DD", value),
    })
}
