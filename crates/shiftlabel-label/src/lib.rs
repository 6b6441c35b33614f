//! Threshold anomaly labeling and curve shifting for shiftlabel.
//!
//! This crate turns a time-ordered price series into labeled bars:
//!
//! - [`forward_pct_changes`] - Close-to-next-close percentage change
//! - [`classify`] - Threshold classification of one change
//! - [`propagate`] - Backward curve shifting of anomaly labels
//! - [`Labeler`] - All of the above applied to a series of bars
//! - [`fill_missing`] - Optional forward/backward fill of absent fields

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod change;
mod classify;
mod fill;
mod labeler;
mod propagate;

pub use change::forward_pct_changes;
pub use classify::classify;
pub use fill::fill_missing;
pub use labeler::Labeler;
pub use propagate::propagate;
