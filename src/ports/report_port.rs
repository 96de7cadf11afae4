//! Report generation port trait.

use std::path::Path;

use crate::domain::error::MeanrevError;
use crate::domain::period::Period;
use crate::domain::scoring::StrategySummary;

/// Everything a report needs about one finished run. Trajectories are a pure
/// sink here; nothing feeds back into the engine.
pub struct ReportContext<'a> {
    pub ticker: &'a str,
    pub period: &'a Period,
    pub scope: usize,
    pub rule_name: &'a str,
    pub summary: &'a StrategySummary,
    pub strategy_trajectory: &'a [f64],
    pub baseline_trajectory: &'a [f64],
}

pub trait ReportPort {
    fn write(&self, ctx: &ReportContext<'_>, output_path: &Path) -> Result<(), MeanrevError>;
}
