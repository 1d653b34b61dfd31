//! Insights report
//!
//! Renders the pipeline results as a Markdown document with pipe tables and
//! Unicode text charts.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::profile::DatasetProfile;
use crate::analysis::explain::CARD_NOTES;
use crate::analysis::{DowSummary, Heatmap, MonthSummary, QualitySummary};
use crate::display::tables::{
    dow_table, heatmap_table, month_table, quality_table, render, spikes_table, TableStyle,
};
use crate::display::{
    format_amount, format_bar, format_percentage, format_signed_bar, shade, sparkline,
};
use crate::error::{PulseError, PulseResult};
use crate::models::{DayOfWeek, ScoredDay, WeeklyMetrics};

const BAR_WIDTH: usize = 30;
const RESIDUAL_HALF_WIDTH: usize = 20;

/// Everything the Markdown report shows
#[derive(Debug, Clone)]
pub struct InsightsReport<'a> {
    pub profile: &'a DatasetProfile,
    pub quality: &'a QualitySummary,
    pub dow: &'a [DowSummary],
    pub month: &'a [MonthSummary],
    pub weekly: &'a [WeeklyMetrics],
    pub heatmap: &'a Heatmap,
    /// Top spike days, highest score first
    pub spikes: &'a [ScoredDay],
    /// Every scored day, in date order
    pub scored: &'a [ScoredDay],
    pub currency_symbol: &'a str,
}

impl InsightsReport<'_> {
    /// Render the full report as Markdown
    pub fn format_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Retail Calendar Pattern Finder: Insights\n\n");
        output.push_str(
            "Seasonality, spike days and driver explanations \
             (transactions, units, AOV, category mix).\n\n",
        );

        self.push_profile(&mut output);
        self.push_quality(&mut output);
        self.push_dow(&mut output);
        self.push_month(&mut output);
        self.push_heatmap(&mut output);
        self.push_spikes(&mut output);
        self.push_residuals(&mut output);

        output.push_str("## Notes\n\n");
        for note in CARD_NOTES {
            output.push_str(&format!("- {}\n", note));
        }
        output.push_str("- AOV is revenue divided by the number of distinct transactions.\n");
        output
    }

    /// Write the report, creating parent directories
    pub fn write(&self, path: &Path) -> PulseResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path).map_err(|e| {
            PulseError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        file.write_all(self.format_markdown().as_bytes())?;

        info!(path = %path.display(), "wrote insights report");
        Ok(())
    }

    fn push_profile(&self, output: &mut String) {
        let p = self.profile;
        let range = match (p.date_min, p.date_max) {
            (Some(min), Some(max)) => format!("{} to {}", min, max),
            _ => "-".to_string(),
        };

        output.push_str("## Dataset profile\n\n");
        output.push_str(&format!("- Rows: {}\n", p.n_rows));
        output.push_str(&format!(
            "- Transaction-days: {} of {} calendar days ({} coverage)\n",
            p.n_days,
            p.span_days(),
            format_percentage(p.coverage() * 100.0)
        ));
        output.push_str(&format!("- Date range: {}\n", range));
        output.push_str(&format!("- Categories: {}\n", p.categories.join(", ")));
        output.push_str(&format!(
            "- Total amount mismatches: {}\n",
            p.total_amount_mismatches
        ));
        if !self.weekly.is_empty() {
            let revenue: Vec<f64> = self.weekly.iter().map(|w| w.revenue.as_f64()).collect();
            output.push_str(&format!("- Weekly revenue trend: `{}`\n", sparkline(&revenue)));
        }
        output.push('\n');
    }

    fn push_quality(&self, output: &mut String) {
        output.push_str("## Data quality\n\n");
        output.push_str(&render(quality_table(self.quality), TableStyle::Markdown));
        output.push_str("\n\n");
    }

    fn push_dow(&self, output: &mut String) {
        output.push_str("## Day-of-week seasonality\n\n");
        output.push_str(&render(
            dow_table(self.dow, self.currency_symbol),
            TableStyle::Markdown,
        ));
        output.push_str("\n\nAverage daily revenue by day-of-week:\n\n```text\n");

        let max = self
            .dow
            .iter()
            .map(|d| d.avg_daily_revenue)
            .fold(0.0, f64::max);
        for day in self.dow {
            output.push_str(&format!(
                "{:<9} {} {}\n",
                day.dow.name(),
                format_bar(day.avg_daily_revenue, max, BAR_WIDTH),
                format_amount(day.avg_daily_revenue, self.currency_symbol)
            ));
        }
        output.push_str("```\n\n");
    }

    fn push_month(&self, output: &mut String) {
        output.push_str("## Monthly revenue (observed transaction-days)\n\n");
        output.push_str(&render(
            month_table(self.month, self.currency_symbol),
            TableStyle::Markdown,
        ));
        output.push_str("\n\n```text\n");

        let max = self
            .month
            .iter()
            .map(|m| m.revenue.as_f64())
            .fold(0.0, f64::max);
        for month in self.month {
            output.push_str(&format!(
                "{} {} {}\n",
                month.month,
                format_bar(month.revenue.as_f64(), max, BAR_WIDTH),
                format_amount(month.revenue.as_f64(), self.currency_symbol)
            ));
        }
        output.push_str("```\n\n");
    }

    fn push_heatmap(&self, output: &mut String) {
        output.push_str("## Month x day-of-week heatmap (average daily revenue)\n\n");
        output.push_str(&render(heatmap_table(self.heatmap), TableStyle::Markdown));
        output.push_str("\n\n```text\n");

        output.push_str("        ");
        for dow in DayOfWeek::ALL {
            output.push_str(&format!("{} ", &dow.short_name()[..2]));
        }
        output.push('\n');

        let max = self.heatmap.max_mean();
        for (month, means) in self.heatmap.months.iter().zip(&self.heatmap.means) {
            output.push_str(&format!("{} ", month));
            for mean in means {
                let cell = shade(*mean, max);
                output.push_str(&format!("{}{} ", cell, cell));
            }
            output.push('\n');
        }
        output.push_str("```\n\n");
    }

    fn push_spikes(&self, output: &mut String) {
        output.push_str(&format!(
            "## Top {} spike days (ranked by robust z-score)\n\n",
            self.spikes.len()
        ));
        if self.spikes.is_empty() {
            output.push_str("No spike days.\n\n");
            return;
        }
        output.push_str(&render(
            spikes_table(self.spikes, self.currency_symbol),
            TableStyle::Markdown,
        ));
        output.push_str("\n\n");
    }

    fn push_residuals(&self, output: &mut String) {
        output.push_str("## Spike residuals over time (actual - expected)\n\n```text\n");

        let max_abs = self
            .scored
            .iter()
            .map(|d| d.residual.abs())
            .fold(0.0, f64::max);
        for day in self.scored {
            output.push_str(&format!(
                "{} {} {}\n",
                day.date,
                format_signed_bar(day.residual, max_abs, RESIDUAL_HALF_WIDTH),
                format_amount(day.residual, self.currency_symbol)
            ));
        }
        output.push_str("```\n\n");
    }
}
