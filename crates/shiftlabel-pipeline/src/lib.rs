//! Stage jobs and batch execution for shiftlabel.
//!
//! - [`Settings`] - TOML-loadable configuration for every stage
//! - [`discover_inputs`] - Input file discovery
//! - [`Stage`] - One file's read, process and write job
//! - [`Batch`] - Concurrent execution over many files
//! - [`BatchReport`] - Per-file outcomes in input order

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod batch;
mod discover;
mod error;
mod settings;
mod stage;

pub use batch::{Batch, BatchReport, FileReport};
pub use discover::{asset_id, discover_inputs};
pub use error::PipelineError;
pub use settings::{LabelSettings, PipelineSettings, Settings};
pub use stage::{FileOutcome, Stage};
