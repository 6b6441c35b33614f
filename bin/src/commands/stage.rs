//! Single-stage commands: label, enrich and transform.

use crate::display::{
    ensure_success, file_done, print_batch_summary, print_counts_header, print_counts_row,
    stage_progress,
};
use crate::settings::IoArgs;
use anyhow::{Context, Result};
use shiftlabel_lib::prelude::*;
use shiftlabel_lib::discover_inputs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Which stage a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageKind {
    Label,
    Enrich,
    Transform,
}

impl StageKind {
    fn build(self, settings: &Settings) -> Result<Stage> {
        let stage = match self {
            Self::Label => Stage::label(settings)?,
            Self::Enrich => Stage::enrich(settings)?,
            Self::Transform => Stage::transform(settings),
        };
        Ok(stage)
    }
}

/// Lists the inputs of `folder`, reporting an empty folder.
pub(crate) fn inputs_of(folder: &Path, quiet: bool) -> Result<Vec<PathBuf>> {
    let inputs = discover_inputs(folder)
        .with_context(|| format!("Failed to list input folder {}", folder.display()))?;

    if inputs.is_empty() {
        warn!(folder = %folder.display(), "no CSV files found");
        if !quiet {
            println!("No CSV files found in '{}'.", folder.display());
        }
    }
    Ok(inputs)
}

/// Runs one stage over `inputs` with a progress bar.
pub(crate) async fn execute(
    kind: StageKind,
    inputs: Vec<PathBuf>,
    output_dir: &Path,
    format: OutputFormat,
    settings: &Settings,
    quiet: bool,
) -> Result<BatchReport> {
    let stage = kind.build(settings)?;
    let progress = stage_progress(stage.name(), inputs.len(), quiet)?;

    let batch = Batch::new(stage, output_dir)
        .with_format(format)
        .with_parallel(settings.pipeline.parallel);
    let report = batch
        .run(inputs, |file| file_done(&progress, file))
        .await
        .with_context(|| format!("Failed to create output folder {}", output_dir.display()))?;

    progress.finish_with_message("done");
    Ok(report)
}

/// Prints the label distribution of every labeled file in a report.
pub(crate) fn print_label_counts(report: &BatchReport) {
    let mut total = LabelCounts::default();
    let mut any = false;

    for (file, outcome) in report.succeeded() {
        if let Some(counts) = outcome.counts {
            if !any {
                println!();
                print_counts_header();
                any = true;
            }
            print_counts_row(&file.asset, &counts);
            total += counts;
        }
    }
    if any {
        print_counts_row("TOTAL", &total);
    }
}

/// Execute a single-stage command.
pub(crate) async fn run_stage(
    kind: StageKind,
    io: &IoArgs,
    settings: &Settings,
    quiet: bool,
) -> Result<()> {
    settings.validate().context("Invalid configuration")?;

    let inputs = inputs_of(&io.input_folder, quiet)?;
    if inputs.is_empty() {
        return Ok(());
    }

    let report = execute(
        kind,
        inputs,
        &io.output_folder,
        settings.pipeline.format,
        settings,
        quiet,
    )
    .await?;

    if kind == StageKind::Label && !quiet {
        print_label_counts(&report);
    }
    print_batch_summary(&format!("{kind:?}"), &report, quiet);
    ensure_success(report.failure_count(), report.files.len())
}
