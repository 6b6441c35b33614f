//! Error types for the pipeline.

use shiftlabel_format::FormatError;
use shiftlabel_types::{ConfigError, TableError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The settings file could not be parsed.
    #[error("Invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    /// Reading or writing a table failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A stage produced an inconsistent table.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// File system error on a specific path.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Parquet output was requested but not compiled in.
    #[error("Parquet support not compiled in")]
    ParquetDisabled,

    /// A blocking file job panicked or was cancelled.
    #[error("File job did not complete: {0}")]
    Task(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
