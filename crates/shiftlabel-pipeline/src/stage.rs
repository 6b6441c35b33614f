//! Per-file stage jobs.

use shiftlabel_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, read_bars, read_table};
use shiftlabel_indicators::{IndicatorConfig, enrich};
use shiftlabel_label::{Labeler, fill_missing};
use shiftlabel_transform::{RobustScaler, TransformConfig, percent_variation};
use shiftlabel_types::{LabelCounts, LabeledBar, Table};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{PipelineError, Settings, asset_id};

/// One processing stage, applied to a single file at a time.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Forward change, threshold labels and curve shifting.
    Label {
        /// Labeling parameters.
        labeler: Labeler,
        /// Fill absent OHLCV values before labeling.
        fill_missing: bool,
    },
    /// Technical indicator columns.
    Enrich {
        /// Indicator parameters.
        indicators: IndicatorConfig,
        /// Drop rows with any absent value after enrichment.
        drop_incomplete: bool,
    },
    /// Percent variation and robust scaling.
    Transform {
        /// Percent-variation parameters.
        transform: TransformConfig,
        /// Scaler fitted per file.
        scaler: RobustScaler,
    },
}

/// Result of one successfully processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Written file.
    pub output: PathBuf,
    /// Data rows read.
    pub rows_in: usize,
    /// Data rows written.
    pub rows_out: usize,
    /// Label distribution of the written rows, when the output has labels.
    pub counts: Option<LabelCounts>,
}

impl Stage {
    /// Label stage from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for an invalid label configuration.
    pub fn label(settings: &Settings) -> Result<Self, PipelineError> {
        Ok(Self::Label {
            labeler: Labeler::new(settings.label.config()?),
            fill_missing: settings.label.fill_missing,
        })
    }

    /// Enrich stage from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for invalid indicator parameters.
    pub fn enrich(settings: &Settings) -> Result<Self, PipelineError> {
        settings.indicators.validate()?;
        Ok(Self::Enrich {
            indicators: settings.indicators.clone(),
            drop_incomplete: settings.pipeline.drop_incomplete,
        })
    }

    /// Transform stage from settings.
    #[must_use]
    pub fn transform(settings: &Settings) -> Self {
        Self::Transform {
            transform: settings.transform.clone(),
            scaler: RobustScaler::new(),
        }
    }

    /// Short stage name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Label { .. } => "label",
            Self::Enrich { .. } => "enrich",
            Self::Transform { .. } => "transform",
        }
    }

    /// Output file name for `input` in `format`.
    #[must_use]
    pub fn output_file_name(&self, input: &Path, format: OutputFormat) -> String {
        let stem = asset_id(input);
        match self {
            Self::Transform { .. } => format!("{stem}_robust_scaled.{}", format.extension()),
            Self::Label { .. } | Self::Enrich { .. } => format!("{stem}.{}", format.extension()),
        }
    }

    /// Reads `input`, applies the stage and writes the result into
    /// `output_dir`.
    ///
    /// A file without data rows produces an output with a header only.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or is malformed, or if
    /// the output cannot be written.
    pub fn process_file(
        &self,
        input: &Path,
        output_dir: &Path,
        format: OutputFormat,
    ) -> Result<FileOutcome, PipelineError> {
        let asset = asset_id(input);
        let output = output_dir.join(self.output_file_name(input, format));
        let reader = BufReader::new(File::open(input).map_err(|e| PipelineError::io(input, e))?);

        let (rows_in, rows_out, counts) = match self {
            Self::Label {
                labeler,
                fill_missing: fill,
            } => {
                let mut bars = read_bars(reader)?;
                if *fill {
                    let filled = fill_missing(&mut bars);
                    if filled > 0 {
                        info!(asset = %asset, filled, "filled missing values");
                    }
                }
                let labeled = labeler.label(&bars);
                write_labeled(&labeled, &output, format)?;

                let counts: LabelCounts = labeled.iter().map(|b| b.label).collect();
                (bars.len(), labeled.len(), Some(counts))
            }
            Self::Enrich {
                indicators,
                drop_incomplete,
            } => {
                let table = read_table(reader)?;
                let mut enriched = enrich(&table, indicators)?;
                if *drop_incomplete {
                    enriched.drop_incomplete_rows();
                }
                write_table(&enriched, &output, format)?;
                (table.len(), enriched.len(), table_counts(&enriched))
            }
            Self::Transform { transform, scaler } => {
                let table = read_table(reader)?;
                let mut transformed = percent_variation(&table, transform)?;
                scaler.fit_transform(&mut transformed);
                write_table(&transformed, &output, format)?;
                (table.len(), transformed.len(), table_counts(&transformed))
            }
        };

        if rows_in == 0 {
            warn!(asset = %asset, stage = self.name(), "empty series, wrote header-only output");
        } else {
            info!(
                asset = %asset,
                stage = self.name(),
                rows_in,
                rows_out,
                output = %output.display(),
                "processed file"
            );
        }

        Ok(FileOutcome {
            output,
            rows_in,
            rows_out,
            counts,
        })
    }
}

fn table_counts(table: &Table) -> Option<LabelCounts> {
    table.labels().map(|labels| labels.iter().copied().collect())
}

fn create(path: &Path) -> Result<BufWriter<File>, PipelineError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| PipelineError::io(path, e))
}

/// Write labeled bars to a file in the specified format.
fn write_labeled(bars: &[LabeledBar], output: &Path, format: OutputFormat) -> Result<(), PipelineError> {
    let writer = create(output)?;

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_labeled(bars, writer)?,
        OutputFormat::Json => JsonFormatter::new().write_labeled(bars, writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_labeled(bars, writer)?,
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                shiftlabel_format::ParquetFormatter::new().write_labeled(bars, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                return Err(PipelineError::ParquetDisabled);
            }
        }
    }

    Ok(())
}

/// Write a feature table to a file in the specified format.
fn write_table(table: &Table, output: &Path, format: OutputFormat) -> Result<(), PipelineError> {
    let writer = create(output)?;

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_table(table, writer)?,
        OutputFormat::Json => JsonFormatter::new().write_table(table, writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_table(table, writer)?,
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                shiftlabel_format::ParquetFormatter::new().write_table(table, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                return Err(PipelineError::ParquetDisabled);
            }
        }
    }

    Ok(())
}
