//! Readers and output formatters for shiftlabel tables.
//!
//! This crate provides:
//!
//! - [`read_bars`] / [`read_table`] - validating CSV readers
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;
mod timestamp;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{read_bars, read_table};
pub use timestamp::{format_timestamp, parse_timestamp};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
