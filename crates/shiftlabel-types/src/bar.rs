//! Price bar representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Label;

/// One OHLCV bar of a single asset.
///
/// Any price or volume field may be absent when the source table has an
/// empty cell for it. Present prices are positive and present volumes are
/// non-negative; readers enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price during the period.
    pub high: Option<f64>,
    /// Lowest price during the period.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl PriceBar {
    /// Creates a bar with every field present.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }

    /// Creates a bar where only the close is known.
    #[must_use]
    pub const fn from_close(timestamp: DateTime<Utc>, close: Option<f64>) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    /// Returns true if every price and volume field is present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.open.is_some()
            && self.high.is_some()
            && self.low.is_some()
            && self.close.is_some()
            && self.volume.is_some()
    }
}

/// A price bar with its forward percentage change and anomaly label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledBar {
    /// The source bar.
    #[serde(flatten)]
    pub bar: PriceBar,
    /// `(close[t+1] - close[t]) / close[t] * 100`, absent for the last bar
    /// or when either close is missing.
    pub pct_change: Option<f64>,
    /// Final label after curve shifting.
    pub label: Label,
}

impl LabeledBar {
    /// Creates a labeled bar.
    #[must_use]
    pub const fn new(bar: PriceBar, pct_change: Option<f64>, label: Label) -> Self {
        Self {
            bar,
            pct_change,
            label,
        }
    }
}
