//! Technical indicator enrichment for shiftlabel tables.
//!
//! - [`moving`] - Rolling sums, means, standard deviations and EMA
//! - [`oscillators`] - MACD, RSI, momentum, CMO and ultimate oscillator
//! - [`bands`] - Bollinger Bands
//! - [`enrich`] - Appends every configured indicator to a [`Table`](shiftlabel_types::Table)

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bands;
mod enrich;
pub mod moving;
pub mod oscillators;

pub use enrich::{IndicatorConfig, enrich};
