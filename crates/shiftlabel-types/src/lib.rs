//! Core types for the shiftlabel anomaly dataset pipeline.
//!
//! This crate provides the fundamental data structures used throughout shiftlabel:
//!
//! - [`PriceBar`] - One OHLCV bar of a single asset
//! - [`Label`] - Anomaly class of a bar
//! - [`LabeledBar`] - A price bar with its forward change and label
//! - [`LabelConfig`] - Validated threshold and curve-shift window
//! - [`Table`] - Column-oriented per-asset feature table

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod config;
mod error;
mod label;
mod table;

pub use bar::{LabeledBar, PriceBar};
pub use config::{DEFAULT_SHIFT_HOURS, DEFAULT_THRESHOLD, LabelConfig};
pub use error::{ConfigError, TableError};
pub use label::{Label, LabelCounts, LabelParseError};
pub use table::{Column, Table};
