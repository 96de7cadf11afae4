//! Configuration validation.
//!
//! Validates all config fields before any run touches price data.

use chrono::NaiveDate;

use super::error::MeanrevError;
use crate::ports::config_port::ConfigPort;

pub const RULE_FIXED_BAND: &str = "fixed_band";
pub const RULE_TILTED: &str = "tilted";

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    match config.get_string("data", "price_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(MeanrevError::ConfigMissing {
            section: "data".to_string(),
            key: "price_dir".to_string(),
        }),
    }
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_principal(config)?;
    validate_scope(config)?;
    validate_dates(config)?;
    validate_tickers(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_rule_name(config)?;
    validate_range(config, "band_width")?;
    validate_range(config, "buy_range")?;
    validate_range(config, "sell_range")?;
    Ok(())
}

pub fn validate_batch_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    if let Some(periods) = config.get_string("batch", "periods") {
        let principal = config.get_double("backtest", "principal", 100.0);
        super::period::parse_periods(&periods, principal).map_err(|e| {
            MeanrevError::ConfigInvalid {
                section: "batch".to_string(),
                key: "periods".to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    let from = config.get_int("batch", "ticker_from", 0);
    let to = config.get_int("batch", "ticker_to", 0);
    if from < 0 || to < 0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "batch".to_string(),
            key: "ticker_from".to_string(),
            reason: "ticker range indices must be non-negative".to_string(),
        });
    }
    if to != 0 && from > to {
        return Err(MeanrevError::ConfigInvalid {
            section: "batch".to_string(),
            key: "ticker_from".to_string(),
            reason: "ticker_from must not exceed ticker_to".to_string(),
        });
    }
    Ok(())
}

fn validate_principal(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("backtest", "principal", 100.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "principal".to_string(),
            reason: "principal must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_scope(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("backtest", "scope", 30);
    if value < super::backtest::MIN_SCOPE as i64 {
        return Err(MeanrevError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "scope".to_string(),
            reason: format!("scope must be at least {}", super::backtest::MIN_SCOPE),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start = parse_date(start_str.as_deref(), "start_date")?;
    let end = parse_date(end_str.as_deref(), "end_date")?;

    if start >= end {
        return Err(MeanrevError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, MeanrevError> {
    match value {
        None => Err(MeanrevError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MeanrevError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let tickers = config.get_string("backtest", "tickers");
    let ticker = config.get_string("backtest", "ticker");

    match (tickers, ticker) {
        (Some(t), _) if !t.trim().is_empty() => Ok(()),
        (None, Some(t)) if !t.trim().is_empty() => Ok(()),
        _ => Err(MeanrevError::ConfigMissing {
            section: "backtest".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_rule_name(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let name = config
        .get_string("strategy", "rule")
        .unwrap_or_else(|| RULE_FIXED_BAND.to_string());
    match name.trim() {
        RULE_FIXED_BAND | RULE_TILTED => Ok(()),
        other => Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rule".to_string(),
            reason: format!(
                "unknown rule '{}', expected {} or {}",
                other, RULE_FIXED_BAND, RULE_TILTED
            ),
        }),
    }
}

fn validate_range(config: &dyn ConfigPort, key: &str) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", key, 2.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{} must be positive", key),
        });
    }
    Ok(())
}
