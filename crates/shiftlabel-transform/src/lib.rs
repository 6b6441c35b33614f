//! Percent variation and robust scaling for shiftlabel tables.
//!
//! - [`percent_variation`] - Appends `{column}_pct_change` columns
//! - [`RobustScaler`] - Median / interquartile-range scaling
//! - [`TransformConfig`] - Columns excluded from the variation step

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod scale;
mod variation;

pub use scale::{ColumnScale, RobustScaler};
pub use variation::{TransformConfig, percent_variation};
