//! Summary command implementation.
//!
//! Reports the class balance of labeled tables.

use crate::commands::stage::inputs_of;
use crate::display::{print_counts_header, print_counts_row};
use anyhow::{Context, Result};
use shiftlabel_lib::prelude::*;
use shiftlabel_lib::asset_id;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Show the label distribution of every labeled table in `folder`.
pub(crate) fn summary(folder: &Path) -> Result<()> {
    let inputs = inputs_of(folder, false)?;
    if inputs.is_empty() {
        return Ok(());
    }

    print_counts_header();
    let mut total = LabelCounts::default();
    let mut skipped = Vec::new();

    for path in &inputs {
        let asset = asset_id(path);
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        match read_table(BufReader::new(file)) {
            Ok(table) => match table.labels() {
                Some(labels) => {
                    let counts: LabelCounts = labels.iter().copied().collect();
                    print_counts_row(&asset, &counts);
                    total += counts;
                }
                None => skipped.push(format!("{asset}: no label column")),
            },
            Err(err) => skipped.push(format!("{asset}: {err}")),
        }
    }

    println!("{}", "-".repeat(69));
    print_counts_row("TOTAL", &total);

    if !skipped.is_empty() {
        println!("\nSkipped:");
        for line in skipped {
            println!("  {line}");
        }
    }

    Ok(())
}
