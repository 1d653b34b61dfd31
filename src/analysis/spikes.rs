//! Spike scoring
//!
//! Robust (median / MAD) z-scores of daily revenue and of the residual
//! against the seasonal baseline, and ranking of the highest-scoring days.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::baseline::Baseline;
use super::stats::{mad, median};
use crate::error::{PulseError, PulseResult};
use crate::models::{DailyMetrics, ScoredDay};

/// Scale factor making MAD comparable to a standard deviation
pub const MAD_SCALE: f64 = 0.6745;

/// Conventional cutoff for a modified z-score outlier
pub const DEFAULT_SPIKE_THRESHOLD: f64 = 3.5;

/// Which score ranks spike days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBy {
    /// Robust z-score of revenue minus expected revenue
    #[default]
    Residual,
    /// Robust z-score of raw revenue
    Revenue,
}

impl ScoreBy {
    /// Score of a day under this ranking
    pub fn score(&self, day: &ScoredDay) -> f64 {
        match self {
            Self::Residual => day.robust_z_residual,
            Self::Revenue => day.robust_z_revenue,
        }
    }

    /// Name of the exported column holding the score
    pub fn column(&self) -> &'static str {
        match self {
            Self::Residual => "robust_z_residual",
            Self::Revenue => "robust_z_revenue",
        }
    }
}

impl fmt::Display for ScoreBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Residual => write!(f, "residual"),
            Self::Revenue => write!(f, "revenue"),
        }
    }
}

/// Modified z-score: `0.6745 * (x - median) / MAD`
///
/// All zeros when the MAD is zero (including empty and constant input).
pub fn robust_zscore(values: &[f64]) -> Vec<f64> {
    let med = median(values);
    let mad = mad(values);
    if mad == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|x| MAD_SCALE * (x - med) / mad).collect()
}

/// Attach expected revenue, residuals and both robust z-scores to each day
pub fn add_spike_scores(
    daily: &[DailyMetrics],
    baseline: &Baseline,
) -> PulseResult<Vec<ScoredDay>> {
    if daily.len() != baseline.len() {
        return Err(PulseError::Validation(format!(
            "Baseline has {} values for {} days",
            baseline.len(),
            daily.len()
        )));
    }

    let mut scored: Vec<ScoredDay> = daily
        .iter()
        .zip(baseline.iter())
        .map(|(day, (expected, level))| ScoredDay::from_daily(day, expected, level))
        .collect();

    let revenue: Vec<f64> = scored.iter().map(|d| d.revenue.as_f64()).collect();
    let residual: Vec<f64> = scored.iter().map(|d| d.residual).collect();
    let z_revenue = robust_zscore(&revenue);
    let z_residual = robust_zscore(&residual);

    for ((day, zr), zres) in scored.iter_mut().zip(z_revenue).zip(z_residual) {
        day.robust_z_revenue = zr;
        day.robust_z_residual = zres;
    }

    debug!(days = scored.len(), "scored days");
    Ok(scored)
}

/// Descending by score, ties broken by the earlier date
fn by_score_desc(by: ScoreBy) -> impl Fn(&&ScoredDay, &&ScoredDay) -> Ordering {
    move |a, b| {
        by.score(b)
            .total_cmp(&by.score(a))
            .then_with(|| a.date.cmp(&b.date))
    }
}

/// The `n` highest-scoring days
pub fn top_spike_days(scored: &[ScoredDay], n: usize, by: ScoreBy) -> Vec<ScoredDay> {
    let mut ranked: Vec<&ScoredDay> = scored.iter().collect();
    ranked.sort_by(by_score_desc(by));
    ranked.into_iter().take(n).cloned().collect()
}

/// Days whose score reaches `threshold`, highest first
pub fn flag_spikes(scored: &[ScoredDay], threshold: f64, by: ScoreBy) -> Vec<ScoredDay> {
    let mut flagged: Vec<&ScoredDay> = scored.iter().filter(|d| by.score(d) >= threshold).collect();
    flagged.sort_by(by_score_desc(by));
    flagged.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::baseline::expected_revenue_month_dow;
    use crate::models::{BaselineLevel, CalendarFields, Money};
    use chrono::NaiveDate;

    fn day(d: u32, revenue: i64) -> DailyMetrics {
        let date = NaiveDate::from_ymd_opt(2023, 3, d).unwrap();
        let cal = CalendarFields::from_date(date);
        DailyMetrics {
            date,
            revenue: Money::from_cents(revenue * 100),
            txns: 1,
            units: 1.0,
            aov: revenue as f64,
            dow: cal.dow,
            month: cal.month,
            week: cal.week,
        }
    }

    #[test]
    fn test_robust_zscore() {
        let z = robust_zscore(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        // median 3, MAD 1
        assert!((z[2]).abs() < 1e-12);
        assert!((z[0] + 2.0 * MAD_SCALE).abs() < 1e-12);
        assert!((z[4] - 97.0 * MAD_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_robust_zscore_zero_mad() {
        assert_eq!(robust_zscore(&[5.0, 5.0, 5.0, 9.0]), vec![0.0; 4]);
        assert!(robust_zscore(&[]).is_empty());
    }

    #[test]
    fn test_add_spike_scores() {
        let daily: Vec<_> = (1..=6).map(|d| day(d, 100 + d as i64)).collect();
        let baseline = Baseline {
            expected: vec![100.0; 6],
            levels: vec![BaselineLevel::Overall; 6],
        };

        let scored = add_spike_scores(&daily, &baseline).unwrap();
        assert_eq!(scored.len(), 6);
        assert!((scored[0].residual - 1.0).abs() < 1e-9);
        assert_eq!(scored[0].baseline_level, BaselineLevel::Overall);
        assert!(scored[5].robust_z_residual > scored[0].robust_z_residual);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let daily = vec![day(1, 10), day(2, 20)];
        let baseline = Baseline {
            expected: vec![10.0],
            levels: vec![BaselineLevel::Overall],
        };
        assert!(add_spike_scores(&daily, &baseline).unwrap_err().is_validation());
    }

    #[test]
    fn test_top_spike_days_ordering() {
        let daily: Vec<_> = [100, 500, 100, 102, 500, 98, 101]
            .iter()
            .enumerate()
            .map(|(i, r)| day(i as u32 + 1, *r))
            .collect();
        let baseline = expected_revenue_month_dow(&daily, 100);
        let scored = add_spike_scores(&daily, &baseline).unwrap();

        let top = top_spike_days(&scored, 3, ScoreBy::Residual);
        assert_eq!(top.len(), 3);
        // Tied 500s: earlier date first
        assert_eq!(top[0].date, daily[1].date);
        assert_eq!(top[1].date, daily[4].date);
        assert_eq!(top[2].date, daily[3].date);

        assert_eq!(top_spike_days(&scored, 50, ScoreBy::Revenue).len(), 7);
    }

    #[test]
    fn test_flag_spikes() {
        let daily: Vec<_> = [100, 101, 99, 100, 102, 98, 400]
            .iter()
            .enumerate()
            .map(|(i, r)| day(i as u32 + 1, *r))
            .collect();
        let baseline = expected_revenue_month_dow(&daily, 100);
        let scored = add_spike_scores(&daily, &baseline).unwrap();

        let flagged = flag_spikes(&scored, DEFAULT_SPIKE_THRESHOLD, ScoreBy::Revenue);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, daily[6].date);
    }

    #[test]
    fn test_score_by_display() {
        assert_eq!(ScoreBy::default(), ScoreBy::Residual);
        assert_eq!(ScoreBy::Revenue.to_string(), "revenue");
        assert_eq!(ScoreBy::Residual.column(), "robust_z_residual");
    }
}
