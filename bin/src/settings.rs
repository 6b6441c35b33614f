//! Command-line arguments layered over the settings file.
//!
//! Precedence is command line, then the `--config` file, then defaults.

use anyhow::{Context, Result};
use clap::Args;
use shiftlabel_lib::Settings;
use std::path::{Path, PathBuf};

use crate::display::Format;

/// Input and output locations shared by every stage.
#[derive(Args, Debug, Clone)]
pub(crate) struct IoArgs {
    /// Folder containing the input CSV tables
    #[arg(short, long, alias = "input_folder")]
    pub(crate) input_folder: PathBuf,

    /// Folder where output tables are written (created if missing)
    #[arg(short, long, alias = "output_folder")]
    pub(crate) output_folder: PathBuf,

    /// Output format [default: csv]
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<Format>,

    /// Maximum files processed concurrently [default: 4]
    #[arg(long)]
    pub(crate) parallel: Option<usize>,
}

impl IoArgs {
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(format) = self.format {
            settings.pipeline.format = format.into();
        }
        if let Some(parallel) = self.parallel {
            settings.pipeline.parallel = parallel;
        }
    }
}

/// Label stage flags.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct LabelArgs {
    /// Percentage threshold for anomaly detection [default: 1.0]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) threshold: Option<f64>,

    /// Rows before an anomaly that inherit its label [default: 4]
    #[arg(long, alias = "shift_hours", allow_negative_numbers = true)]
    pub(crate) shift_hours: Option<i64>,

    /// Forward/back-fill missing OHLCV values before labeling
    #[arg(long, alias = "fill_missing")]
    pub(crate) fill_missing: bool,
}

impl LabelArgs {
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(threshold) = self.threshold {
            settings.label.threshold = threshold;
        }
        if let Some(shift_hours) = self.shift_hours {
            settings.label.shift_hours = shift_hours;
        }
        if self.fill_missing {
            settings.label.fill_missing = true;
        }
    }
}

/// Enrich stage flags.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct EnrichArgs {
    /// Indicator periods, comma separated [default: 5,12,13,14,20,21,26,30,50,100,200]
    #[arg(long, value_delimiter = ',')]
    pub(crate) periods: Option<Vec<usize>>,

    /// Keep rows with incomplete indicator values
    #[arg(long)]
    pub(crate) keep_incomplete: bool,
}

impl EnrichArgs {
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(periods) = &self.periods {
            settings.indicators.periods.clone_from(periods);
        }
        if self.keep_incomplete {
            settings.pipeline.drop_incomplete = false;
        }
    }
}

/// Transform stage flags.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct TransformArgs {
    /// Columns without a percent-variation column, comma separated [default: volume]
    #[arg(long, value_delimiter = ',')]
    pub(crate) exclude: Option<Vec<String>>,
}

impl TransformArgs {
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(exclude) = &self.exclude {
            settings.transform.exclude.clone_from(exclude);
        }
    }
}

/// Loads the settings file, or defaults when none is given.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}
