//! Full pipeline command.
//!
//! Chains label, enrich and transform through `processed/`,
//! `with_indicators/` and `transformed/` under the output folder. The
//! intermediate tables are always CSV; the chosen format applies to the
//! transformed output.

use crate::commands::stage::{StageKind, execute, inputs_of, print_label_counts};
use crate::display::{ensure_success, print_batch_summary};
use crate::settings::IoArgs;
use anyhow::{Context, Result};
use shiftlabel_lib::prelude::*;

/// Execute the run command.
pub(crate) async fn run_all(io: &IoArgs, settings: &Settings, quiet: bool) -> Result<()> {
    settings.validate().context("Invalid configuration")?;

    let inputs = inputs_of(&io.input_folder, quiet)?;
    if inputs.is_empty() {
        return Ok(());
    }
    let total = inputs.len();

    let out = &io.output_folder;
    let labeled = execute(
        StageKind::Label,
        inputs,
        &out.join("processed"),
        OutputFormat::Csv,
        settings,
        quiet,
    )
    .await?;
    let enriched = execute(
        StageKind::Enrich,
        labeled.outputs(),
        &out.join("with_indicators"),
        OutputFormat::Csv,
        settings,
        quiet,
    )
    .await?;
    let transformed = execute(
        StageKind::Transform,
        enriched.outputs(),
        &out.join("transformed"),
        settings.pipeline.format,
        settings,
        quiet,
    )
    .await?;

    if !quiet {
        print_label_counts(&labeled);
    }
    let mut failures = 0;
    for (stage, report) in [
        ("Label", &labeled),
        ("Enrich", &enriched),
        ("Transform", &transformed),
    ] {
        print_batch_summary(stage, report, quiet);
        failures += report.failure_count();
    }

    ensure_success(failures, total)
}
