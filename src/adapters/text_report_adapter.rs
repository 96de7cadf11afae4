//! Plain-text report adapter.
//!
//! Writes the metric table for one run, one metric per line.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::error::MeanrevError;
use crate::ports::report_port::{ReportContext, ReportPort};

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn format(ctx: &ReportContext<'_>) -> String {
        let mut out = String::new();
        let s = ctx.summary;

        let _ = writeln!(out, "Strategy versus Buy and Hold for {}", ctx.ticker);
        let _ = writeln!(out, "Period: {}", ctx.period.label());
        let _ = writeln!(out, "Rule: {} (scope {})", ctx.rule_name, ctx.scope);
        let _ = writeln!(out);
        let _ = writeln!(out, "Initial Investment:      {:.2}", s.principal);
        let _ = writeln!(
            out,
            "Buy and Hold Returns:    {:.2}  ({:.2} %)",
            s.baseline_return, s.baseline_percent
        );
        let _ = writeln!(
            out,
            "Strategy Returns:        {:.2}  ({:.2} %)",
            s.strategy_return, s.strategy_percent
        );
        let _ = writeln!(
            out,
            "Risk-Adjusted Returns:   {:.2} %",
            s.risk_adjusted_percent
        );
        let _ = writeln!(out, "Number of Trades:        {}", s.trades);
        let _ = writeln!(out, "Win / Loss Ratio:        {:.2}", s.win_loss_ratio);

        out
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, ctx: &ReportContext<'_>, output_path: &Path) -> Result<(), MeanrevError> {
        fs::write(output_path, Self::format(ctx))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::Period;
    use crate::domain::scoring::StrategySummary;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_context<'a>(
        period: &'a Period,
        summary: &'a StrategySummary,
    ) -> ReportContext<'a> {
        ReportContext {
            ticker: "AAPL",
            period,
            scope: 30,
            rule_name: "fixed_band",
            summary,
            strategy_trajectory: &[],
            baseline_trajectory: &[],
        }
    }

    fn sample_summary() -> StrategySummary {
        StrategySummary {
            principal: 100.0,
            baseline_return: 125.0,
            baseline_percent: 25.0,
            strategy_return: 200.0,
            strategy_percent: 100.0,
            risk_adjusted_percent: 500.0,
            trades: 1,
            win_loss_ratio: 0.0,
        }
    }

    fn sample_period() -> Period {
        Period::new(
            NaiveDate::from_ymd_opt(2014, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn format_contains_all_metrics() {
        let period = sample_period();
        let summary = sample_summary();
        let text = TextReportAdapter::format(&sample_context(&period, &summary));

        assert!(text.contains("Strategy versus Buy and Hold for AAPL"));
        assert!(text.contains("2014-01-02 to 2024-01-01"));
        assert!(text.contains("Buy and Hold Returns:    125.00  (25.00 %)"));
        assert!(text.contains("Strategy Returns:        200.00  (100.00 %)"));
        assert!(text.contains("Risk-Adjusted Returns:   500.00 %"));
        assert!(text.contains("Number of Trades:        1"));
        assert!(text.contains("Win / Loss Ratio:        0.00"));
    }

    #[test]
    fn write_creates_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        let period = sample_period();
        let summary = sample_summary();
        TextReportAdapter
            .write(&sample_context(&period, &summary), &path)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("AAPL"));
    }
}
