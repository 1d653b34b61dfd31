//! End-to-end pipeline
//!
//! Loads the input CSV, runs every analysis stage, and writes the CSV /
//! JSON / YAML outputs and the Markdown report.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::analysis::{
    add_spike_scores, basic_sanity_checks, build_spike_cards, check_total_amount_identity,
    daily_category_mix, daily_metrics, dow_summary, expected_revenue_month_dow, flag_spikes,
    month_dow_heatmap, month_summary, top_spike_days, weekly_metrics, Baseline, DowSummary,
    Heatmap, IdentityCheck, MonthSummary, QualitySummary, ScoreBy, SpikeCard,
};
use crate::config::Settings;
use crate::error::{PulseError, PulseResult};
use crate::export::{
    create_output_file, export_rows_to_file, export_spike_days_csv, write_document, ExportFormat,
    OutputPaths,
};
use crate::ingest::{CsvLoader, Dataset};
use crate::models::{CategoryMixRow, DailyMetrics, Money, ScoredDay, WeeklyMetrics};
use crate::reports::{DatasetProfile, InsightsReport};

/// Options for one pipeline run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    pub top_n: usize,
    pub min_cell_days: usize,
    pub score_by: ScoreBy,
    pub spike_threshold: f64,
    pub export_format: ExportFormat,
    pub currency_symbol: String,
    pub date_format: String,
    pub delimiter: char,
}

impl RunOptions {
    /// Options for `input` with every other value taken from settings
    pub fn from_settings(input: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            input: input.into(),
            out_dir: settings.output_dir.clone(),
            report_path: settings.report_path.clone(),
            top_n: settings.top_n,
            min_cell_days: settings.min_cell_days,
            score_by: settings.score_by,
            spike_threshold: settings.spike_threshold,
            export_format: settings.export_format,
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            delimiter: settings.delimiter,
        }
    }

    /// Options for `input` with default settings
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::from_settings(input, &Settings::default())
    }

    pub fn validate(&self) -> PulseResult<()> {
        if self.top_n == 0 {
            return Err(PulseError::Validation("top-n must be at least 1".into()));
        }
        if self.min_cell_days == 0 {
            return Err(PulseError::Validation(
                "min-cell-days must be at least 1".into(),
            ));
        }
        if !self.spike_threshold.is_finite() {
            return Err(PulseError::Validation(
                "spike threshold must be a finite number".into(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(PulseError::Validation(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    fn loader(&self) -> CsvLoader {
        CsvLoader::new()
            .with_date_format(&self.date_format)
            .with_delimiter(self.delimiter)
    }
}

/// Headline totals over every transaction-day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewTotals {
    pub revenue: Money,
    pub txns: usize,
    pub units: f64,
    /// Mean of the daily AOVs
    pub avg_aov: f64,
}

/// In-memory results of every analysis stage
#[derive(Debug, Clone)]
pub struct Analysis {
    pub dataset: Dataset,
    pub quality: QualitySummary,
    pub identity: Vec<IdentityCheck>,
    pub daily: Vec<DailyMetrics>,
    pub weekly: Vec<WeeklyMetrics>,
    pub mix: Vec<CategoryMixRow>,
    pub dow: Vec<DowSummary>,
    pub month: Vec<MonthSummary>,
    pub heatmap: Heatmap,
    pub baseline: Baseline,
    /// Every day with scores, in date order
    pub scored: Vec<ScoredDay>,
    /// Top-n days by the chosen score
    pub spikes: Vec<ScoredDay>,
    /// Days at or above the spike threshold
    pub flagged: Vec<ScoredDay>,
    pub cards: Vec<SpikeCard>,
    pub profile: DatasetProfile,
    pub score_by: ScoreBy,
}

impl Analysis {
    pub fn totals(&self) -> OverviewTotals {
        let aov: Vec<f64> = self.daily.iter().map(|d| d.aov).collect();
        OverviewTotals {
            revenue: self.daily.iter().map(|d| d.revenue).sum(),
            txns: self.daily.iter().map(|d| d.txns).sum(),
            units: self.daily.iter().map(|d| d.units).sum(),
            avg_aov: crate::analysis::stats::mean(&aov),
        }
    }

    /// Category rows of one day, highest revenue first
    pub fn day_mix(&self, date: chrono::NaiveDate) -> Vec<&CategoryMixRow> {
        let mut rows: Vec<&CategoryMixRow> = self.mix.iter().filter(|r| r.date == date).collect();
        rows.sort_by(|a, b| b.category_revenue.cmp(&a.category_revenue));
        rows
    }

    /// Markdown report over these results
    pub fn report<'a>(&'a self, currency_symbol: &'a str) -> InsightsReport<'a> {
        InsightsReport {
            profile: &self.profile,
            quality: &self.quality,
            dow: &self.dow,
            month: &self.month,
            weekly: &self.weekly,
            heatmap: &self.heatmap,
            spikes: &self.spikes,
            scored: &self.scored,
            currency_symbol,
        }
    }
}

/// Where a run wrote its results
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    pub n_spikes: usize,
    pub files: Vec<PathBuf>,
}

/// The seasonality and spike pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: RunOptions,
}

impl Pipeline {
    pub fn new(options: RunOptions) -> PulseResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Change the number of exported spike days
    pub fn set_top_n(&mut self, top_n: usize) -> PulseResult<()> {
        let mut options = self.options.clone();
        options.top_n = top_n;
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Read the input CSV
    pub fn load(&self) -> PulseResult<Dataset> {
        self.options.loader().load_path(&self.options.input)
    }

    /// Run every analysis stage on a loaded dataset
    #[instrument(skip_all, fields(rows = dataset.n_rows()))]
    pub fn analyze(&self, dataset: Dataset) -> PulseResult<Analysis> {
        let opts = &self.options;

        let identity = check_total_amount_identity(&dataset);
        let quality = basic_sanity_checks(&dataset).with_mismatches(&identity);
        if !quality.is_clean() {
            warn!(
                missing = quality.n_missing_any,
                mismatches = quality.total_amount_mismatches,
                "input has data quality issues"
            );
        }

        let daily = daily_metrics(&dataset);
        let weekly = weekly_metrics(&dataset);
        let mix = daily_category_mix(&dataset);

        let dow = dow_summary(&daily);
        let month = month_summary(&daily);
        let heatmap = month_dow_heatmap(&daily);

        let baseline = expected_revenue_month_dow(&daily, opts.min_cell_days);
        let scored = add_spike_scores(&daily, &baseline)?;
        let spikes = top_spike_days(&scored, opts.top_n, opts.score_by);
        let flagged = flag_spikes(&scored, opts.spike_threshold, opts.score_by);
        let cards = build_spike_cards(&scored, &mix, opts.top_n, opts.score_by);

        let profile = DatasetProfile::from_dataset(&dataset, quality.total_amount_mismatches);
        info!(
            days = daily.len(),
            spikes = spikes.len(),
            flagged = flagged.len(),
            "analysis complete"
        );

        Ok(Analysis {
            dataset,
            quality,
            identity,
            daily,
            weekly,
            mix,
            dow,
            month,
            heatmap,
            baseline,
            scored,
            spikes,
            flagged,
            cards,
            profile,
            score_by: opts.score_by,
        })
    }

    /// Write every output file and the report
    pub fn write_outputs(&self, analysis: &Analysis) -> PulseResult<RunSummary> {
        let opts = &self.options;
        let paths = OutputPaths::new(&opts.out_dir, opts.export_format);
        paths.ensure_dir()?;

        export_rows_to_file(&analysis.daily, &paths.daily_metrics())?;
        export_rows_to_file(&analysis.weekly, &paths.weekly_metrics())?;
        export_rows_to_file(&analysis.mix, &paths.category_mix())?;
        export_rows_to_file(&analysis.scored, &paths.daily_scored())?;
        export_spike_days_csv(&analysis.spikes, create_output_file(&paths.spike_days())?)?;
        write_document(&analysis.cards, &paths.spike_cards(), paths.format())?;
        write_document(&analysis.quality, &paths.quality_summary(), paths.format())?;

        analysis
            .report(&opts.currency_symbol)
            .write(&opts.report_path)?;

        info!(out_dir = %opts.out_dir.display(), "wrote outputs");
        Ok(RunSummary {
            out_dir: opts.out_dir.clone(),
            report_path: opts.report_path.clone(),
            n_spikes: analysis.spikes.len(),
            files: paths.all(),
        })
    }

    /// Load, analyze and write everything
    pub fn run(&self) -> PulseResult<(Analysis, RunSummary)> {
        info!(input = %self.options.input.display(), "starting pipeline run");
        let dataset = self.load()?;
        let analysis = self.analyze(dataset)?;
        let summary = self.write_outputs(&analysis)?;
        Ok((analysis, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Transaction ID,Date,Customer ID,Gender,Age,Product Category,Quantity,Price per Unit,Total Amount
1,2023-01-02,CUST001,Male,34,Beauty,3,50,150
2,2023-01-02,CUST002,Female,26,Clothing,2,500,1000
3,2023-01-03,CUST003,Male,50,Electronics,1,30,30
4,2023-01-04,CUST004,Male,37,Clothing,1,500,500
5,2023-01-05,CUST005,Male,30,Beauty,2,50,100
6,2023-01-09,CUST006,Female,45,Beauty,1,30,30
7,2023-01-10,CUST007,Male,46,Clothing,2,25,50
8,2023-01-11,CUST008,Male,30,Electronics,4,25,100
9,2023-01-12,CUST009,Male,63,Electronics,2,300,600
10,2023-01-16,CUST010,Female,52,Clothing,4,50,200
";

    fn options(temp: &TempDir) -> RunOptions {
        let input = temp.path().join("retail.csv");
        fs::write(&input, SAMPLE).unwrap();

        let mut options = RunOptions::new(input);
        options.out_dir = temp.path().join("outputs");
        options.report_path = temp.path().join("reports").join("insights.md");
        options.top_n = 3;
        options
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(options(&temp)).unwrap();

        let (analysis, summary) = pipeline.run().unwrap();

        assert_eq!(summary.n_spikes, 3);
        for file in &summary.files {
            assert!(file.exists(), "missing {}", file.display());
        }
        assert!(summary.report_path.exists());

        assert_eq!(analysis.daily.len(), 9);
        assert_eq!(analysis.cards.len(), 3);
        assert_eq!(analysis.profile.n_rows, 10);
        assert_eq!(analysis.quality.total_amount_mismatches, 0);

        let cards = fs::read_to_string(temp.path().join("outputs/spike_cards.json")).unwrap();
        let cards: serde_json::Value = serde_json::from_str(&cards).unwrap();
        assert_eq!(cards.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_yaml_format() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(&temp);
        opts.export_format = ExportFormat::Yaml;

        let (_, summary) = Pipeline::new(opts).unwrap().run().unwrap();
        assert!(summary
            .files
            .iter()
            .any(|f| f.ends_with("quality_summary.yaml")));
        assert!(temp.path().join("outputs/spike_cards.yaml").exists());
    }

    #[test]
    fn test_totals() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(options(&temp)).unwrap();
        let analysis = pipeline.analyze(pipeline.load().unwrap()).unwrap();

        let totals = analysis.totals();
        assert_eq!(totals.revenue, Money::from_cents(276000));
        assert_eq!(totals.txns, 10);
        assert_eq!(totals.units, 22.0);
    }

    #[test]
    fn test_day_mix_sorted_by_revenue() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(options(&temp)).unwrap();
        let analysis = pipeline.analyze(pipeline.load().unwrap()).unwrap();

        let day = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mix = analysis.day_mix(day);
        assert_eq!(mix[0].product_category, "Clothing");
    }

    #[test]
    fn test_invalid_options() {
        let mut opts = RunOptions::new("x.csv");
        opts.top_n = 0;
        assert!(Pipeline::new(opts).unwrap_err().is_validation());

        let mut opts = RunOptions::new("x.csv");
        opts.delimiter = 'é';
        assert!(Pipeline::new(opts).unwrap_err().is_validation());

        let mut opts = RunOptions::new("x.csv");
        opts.min_cell_days = 0;
        assert!(Pipeline::new(opts).is_err());
    }

    #[test]
    fn test_top_n_beyond_day_count_returns_every_day() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(&temp);
        opts.top_n = 1000;
        let pipeline = Pipeline::new(opts).unwrap();
        let analysis = pipeline.analyze(pipeline.load().unwrap()).unwrap();

        assert_eq!(analysis.spikes.len(), analysis.daily.len());
        assert_eq!(analysis.cards.len(), analysis.daily.len());
    }

    #[test]
    fn test_set_top_n() {
        let mut pipeline = Pipeline::new(RunOptions::new("x.csv")).unwrap();
        pipeline.set_top_n(20).unwrap();
        assert_eq!(pipeline.options().top_n, 20);
        assert!(pipeline.set_top_n(0).is_err());
        assert_eq!(pipeline.options().top_n, 20);
    }

    #[test]
    fn test_analyze_in_memory_dataset() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let dataset = Dataset::new(
            vec![Transaction::new(date, "1")
                .with_category("Toys")
                .with_amounts(1.0, Money::from_cents(100), Money::from_cents(100))],
            "memory",
        );
        let analysis = Pipeline::new(RunOptions::new("unused"))
            .unwrap()
            .analyze(dataset)
            .unwrap();

        assert_eq!(analysis.scored.len(), 1);
        assert_eq!(analysis.scored[0].robust_z_residual, 0.0);
        assert!(analysis.flagged.is_empty());
    }
}
