//! Display utilities for the shiftlabel CLI.

use anyhow::Result;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use shiftlabel_lib::prelude::*;
use shiftlabel_lib::FileReport;

/// Output format for written tables.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Creates a per-stage file progress bar, hidden in quiet mode.
pub(crate) fn stage_progress(stage: &str, files: usize, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(files as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_prefix(format!("{stage:>9}"));
    Ok(pb)
}

/// Advances a progress bar for one finished file.
pub(crate) fn file_done(pb: &ProgressBar, report: &FileReport) {
    if report.is_success() {
        pb.set_message(report.asset.clone());
    } else {
        pb.set_message(format!("{} failed", report.asset));
    }
    pb.inc(1);
}

/// Percentage of `part` in `total`, 0 for an empty total.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Prints one row of the label distribution table.
pub(crate) fn print_counts_row(name: &str, counts: &LabelCounts) {
    let total = counts.total();
    println!(
        "{:<24} {:>8} {:>8} {:>8} {:>8} {:>7.2}%",
        name,
        total,
        counts.stable,
        counts.upward,
        counts.downward,
        percent(counts.anomalies(), total)
    );
}

/// Prints the header of the label distribution table.
pub(crate) fn print_counts_header() {
    println!(
        "{:<24} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "ASSET", "ROWS", "STABLE", "UP", "DOWN", "ANOMALY"
    );
    println!("{}", "-".repeat(69));
}

/// Prints the outcome of a batch.
pub(crate) fn print_batch_summary(stage: &str, report: &BatchReport, quiet: bool) {
    if quiet {
        return;
    }

    let failures = report.failure_count();
    println!("\n{stage} complete:");
    println!("  Successful: {}", report.files.len() - failures);
    if failures > 0 {
        println!("  Failed: {failures}");
        for (i, (file, err)) in report.failed().enumerate() {
            println!("    {}: {} ({}): {err}", i + 1, file.asset, file.input.display());
        }
    }
}

/// Returns an error if any of `total` files failed.
pub(crate) fn ensure_success(failures: usize, total: usize) -> Result<()> {
    if failures > 0 {
        anyhow::bail!("{} out of {} files failed", failures, total);
    }
    Ok(())
}
