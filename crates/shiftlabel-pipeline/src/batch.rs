//! Concurrent execution of one stage over many files.

use futures::stream::{self, StreamExt};
use shiftlabel_format::OutputFormat;
use shiftlabel_types::LabelCounts;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::settings::DEFAULT_PARALLEL;
use crate::{FileOutcome, PipelineError, Stage, asset_id};

/// Outcome of one input file.
#[derive(Debug)]
pub struct FileReport {
    /// Input path.
    pub input: PathBuf,
    /// Asset identifier (the input file stem).
    pub asset: String,
    /// What happened to the file.
    pub result: Result<FileOutcome, PipelineError>,
}

impl FileReport {
    /// Returns true if the file was processed and written.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One report per input file.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Successfully processed files.
    pub fn succeeded(&self) -> impl Iterator<Item = (&FileReport, &FileOutcome)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().ok().map(|outcome| (f, outcome)))
    }

    /// Failed files with their errors.
    pub fn failed(&self) -> impl Iterator<Item = (&FileReport, &PipelineError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|err| (f, err)))
    }

    /// Number of failed files.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// Returns true if every file succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.files.iter().all(FileReport::is_success)
    }

    /// Written output paths, in input order.
    #[must_use]
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.succeeded()
            .map(|(_, outcome)| outcome.output.clone())
            .collect()
    }

    /// Label distribution summed over every successful file.
    #[must_use]
    pub fn total_counts(&self) -> LabelCounts {
        let mut total = LabelCounts::default();
        for (_, outcome) in self.succeeded() {
            if let Some(counts) = outcome.counts {
                total += counts;
            }
        }
        total
    }
}

/// Runs one [`Stage`] over a set of files with bounded parallelism.
#[derive(Debug, Clone)]
pub struct Batch {
    stage: Arc<Stage>,
    output_dir: PathBuf,
    format: OutputFormat,
    parallel: usize,
}

impl Batch {
    /// Creates a batch writing CSV into `output_dir`.
    pub fn new(stage: Stage, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            stage: Arc::new(stage),
            output_dir: output_dir.into(),
            format: OutputFormat::Csv,
            parallel: DEFAULT_PARALLEL,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the number of files processed concurrently (at least 1).
    #[must_use]
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    /// The stage this batch runs.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Processes every input, creating the output directory first.
    ///
    /// `on_file` is called as each file finishes, in completion order. The
    /// returned report is in input order regardless of parallelism.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] only if the output directory cannot be
    /// created; per-file failures are recorded in the report.
    pub async fn run<F>(&self, inputs: Vec<PathBuf>, mut on_file: F) -> Result<BatchReport, PipelineError>
    where
        F: FnMut(&FileReport),
    {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| PipelineError::io(&self.output_dir, e))?;

        info!(
            stage = self.stage.name(),
            files = inputs.len(),
            parallel = self.parallel,
            output_dir = %self.output_dir.display(),
            "starting batch"
        );

        let mut pending = stream::iter(inputs.into_iter().enumerate())
            .map(|(index, input)| {
                let stage = Arc::clone(&self.stage);
                let output_dir = self.output_dir.clone();
                let format = self.format;
                async move {
                    let job_input = input.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        stage.process_file(&job_input, &output_dir, format)
                    })
                    .await
                    .unwrap_or_else(|e| Err(PipelineError::Task(e.to_string())));

                    let report = FileReport {
                        asset: asset_id(&input),
                        input,
                        result,
                    };
                    (index, report)
                }
            })
            .buffer_unordered(self.parallel);

        let mut finished = Vec::new();
        while let Some((index, report)) = pending.next().await {
            if let Err(err) = &report.result {
                warn!(
                    asset = %report.asset,
                    path = %report.input.display(),
                    error = %err,
                    "file failed"
                );
            }
            on_file(&report);
            finished.push((index, report));
        }
        finished.sort_by_key(|(index, _)| *index);

        let report = BatchReport {
            files: finished.into_iter().map(|(_, report)| report).collect(),
        };
        info!(
            stage = self.stage.name(),
            succeeded = report.files.len() - report.failure_count(),
            failed = report.failure_count(),
            "batch finished"
        );
        Ok(report)
    }
}
