//! Integration tests for the `pulse` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("retail_sample.csv")
}

/// `pulse` with settings isolated in a temp directory
fn pulse(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pulse").unwrap();
    cmd.env("RETAIL_PULSE_HOME", home.path())
        .env_remove("RETAIL_PULSE_INPUT")
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_run_writes_outputs_and_report() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("outputs");
    let report = temp.path().join("reports").join("insights.md");

    pulse(&temp)
        .arg("run")
        .arg("--input")
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .arg("--top-n")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done! Project outputs created."))
        .stdout(predicate::str::contains("Outputs folder:"))
        .stdout(predicate::str::contains("Report:"))
        .stdout(predicate::str::contains("Spike days exported: 5"));

    for name in [
        "daily_metrics.csv",
        "weekly_metrics.csv",
        "daily_category_mix.csv",
        "daily_scored.csv",
        "spike_days.csv",
        "spike_cards.json",
        "quality_summary.json",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }

    let spikes = std::fs::read_to_string(out.join("spike_days.csv")).unwrap();
    let first = spikes.lines().nth(1).unwrap();
    assert!(first.starts_with("2023-02-18"), "{first}");

    let cards: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("spike_cards.json")).unwrap())
            .unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 5);
    assert_eq!(cards[0]["top_category"]["name"], "Electronics");

    let markdown = std::fs::read_to_string(&report).unwrap();
    assert!(markdown.contains("## Day-of-week seasonality"));
    assert!(markdown.contains("2023-02-18"));
}

#[test]
fn test_run_yaml_format() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["run", "--format", "yaml", "--input"])
        .arg(fixture())
        .assert()
        .success();

    // Relative defaults resolve against the working directory
    assert!(temp.path().join("outputs").join("spike_cards.yaml").exists());
    assert!(temp.path().join("reports").join("insights.md").exists());
}

#[test]
fn test_quality_reports_mismatch() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["quality", "--show-mismatches", "5", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total != quantity x price"))
        .stdout(predicate::str::contains("2023-01-22"));
}

#[test]
fn test_quality_json() {
    let temp = TempDir::new().unwrap();

    let assert = pulse(&temp)
        .args(["quality", "--json", "--input"])
        .arg(fixture())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["n_rows"], 173);
    assert_eq!(json["total_amount_mismatches"], 1);
    assert_eq!(json["date_min"], "2023-01-02");
}

#[test]
fn test_seasonality_views() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["seasonality", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Day-of-week patterns"))
        .stdout(predicate::str::contains("Saturday"));

    pulse(&temp)
        .args(["seasonality", "--by", "month", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-02"));

    pulse(&temp)
        .args(["seasonality", "--by", "heatmap", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Month x day-of-week"));
}

#[test]
fn test_spikes_threshold() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["spikes", "--top-n", "3", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 3 spike days"))
        .stdout(predicate::str::contains("2023-02-18"));

    pulse(&temp)
        .args(["spikes", "--threshold", "100", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("No spike days found."));
}

#[test]
fn test_explain_any_observed_date() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["explain", "--date", "2023-02-18", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Electronics"))
        .stdout(predicate::str::contains("Rank 1 of the top"));

    let assert = pulse(&temp)
        .args(["explain", "--json", "--date", "2023-01-03", "--input"])
        .arg(fixture())
        .assert()
        .success();
    let card: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(card["date"], "2023-01-03");
    assert_eq!(card["notes"].as_array().unwrap().len(), 2);
}

#[test]
fn test_explain_unknown_date_fails() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["explain", "--date", "2024-07-01", "--input"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("2024-07-01"));

    pulse(&temp)
        .args(["explain", "--date", "18/02/2023", "--input"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_missing_input_fails() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["run", "--input", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.csv"));
}

#[test]
fn test_missing_columns_fail() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("bad.csv");
    std::fs::write(&input, "Date,Amount\n2023-01-01,10\n").unwrap();

    pulse(&temp)
        .args(["quality", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required columns"));
}

#[test]
fn test_invalid_top_n_fails() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["run", "--top-n", "0", "--input"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("top-n"));
}

#[test]
fn test_large_top_n_exports_every_day() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["run", "--top-n", "1000", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Spike days exported: 75"));
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .args(["quality", "--delimiter", "é", "--input"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}

#[test]
fn test_init_and_config() {
    let temp = TempDir::new().unwrap();

    pulse(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));
    assert!(temp.path().join("config.json").exists());

    pulse(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retail Pulse Configuration"))
        .stdout(predicate::str::contains("Top-n:           15"));
}

#[test]
fn test_settings_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.json"), r#"{ "top_n": 2 }"#).unwrap();

    pulse(&temp)
        .args(["spikes", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 spike days"));
}
