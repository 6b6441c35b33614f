//! Threshold anomaly labeling with curve shifting for OHLCV time series.
//!
//! This is a facade crate that re-exports functionality from the shiftlabel
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use shiftlabel_types::*;

// Re-export labeling
pub use shiftlabel_label::{Labeler, classify, fill_missing, forward_pct_changes, propagate};

// Re-export indicators
#[cfg(feature = "indicators")]
pub use shiftlabel_indicators::{IndicatorConfig, bands, enrich, moving, oscillators};

// Re-export transformation
#[cfg(feature = "transform")]
pub use shiftlabel_transform::{ColumnScale, RobustScaler, TransformConfig, percent_variation};

// Re-export formatters
#[cfg(feature = "format")]
pub use shiftlabel_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, read_bars,
    read_table,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use shiftlabel_format::ParquetFormatter;

// Re-export batch execution
#[cfg(feature = "pipeline")]
pub use shiftlabel_pipeline::{
    Batch, BatchReport, FileOutcome, FileReport, LabelSettings, PipelineError, PipelineSettings,
    Settings, Stage, asset_id, discover_inputs,
};

/// Prelude module for convenient imports.
///
/// ```
/// use shiftlabel_lib::prelude::*;
/// ```
pub mod prelude {
    pub use shiftlabel_types::{
        ConfigError, Label, LabelConfig, LabelCounts, LabeledBar, PriceBar, Table, TableError,
    };

    pub use shiftlabel_label::Labeler;

    #[cfg(feature = "indicators")]
    pub use shiftlabel_indicators::{IndicatorConfig, enrich};

    #[cfg(feature = "transform")]
    pub use shiftlabel_transform::{RobustScaler, TransformConfig, percent_variation};

    #[cfg(feature = "format")]
    pub use shiftlabel_format::{
        CsvFormatter, Formatter, JsonFormatter, OutputFormat, read_bars, read_table,
    };

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use shiftlabel_format::ParquetFormatter;

    #[cfg(feature = "pipeline")]
    pub use shiftlabel_pipeline::{Batch, BatchReport, PipelineError, Settings, Stage};
}
