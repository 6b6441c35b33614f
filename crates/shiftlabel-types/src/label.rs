//! Anomaly label definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Anomaly class of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Forward change within the threshold band.
    #[default]
    Stable,
    /// Forward change above `+threshold`.
    UpwardAnomaly,
    /// Forward change below `-threshold`.
    DownwardAnomaly,
}

impl Label {
    /// Returns true for either anomaly direction.
    #[must_use]
    pub const fn is_anomaly(&self) -> bool {
        !matches!(self, Self::Stable)
    }

    /// Returns the label as written to output tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::UpwardAnomaly => "upward_anomaly",
            Self::DownwardAnomaly => "downward_anomaly",
        }
    }

    /// Returns the numeric class code (0 stable, 1 upward, 2 downward).
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Stable => 0,
            Self::UpwardAnomaly => 1,
            Self::DownwardAnomaly => 2,
        }
    }

    /// Returns all labels in class-code order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Stable, Self::UpwardAnomaly, Self::DownwardAnomaly]
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stable" | "0" => Ok(Self::Stable),
            "upward_anomaly" | "upward" | "1" => Ok(Self::UpwardAnomaly),
            "downward_anomaly" | "downward" | "2" => Ok(Self::DownwardAnomaly),
            _ => Err(LabelParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid label string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParseError(String);

impl std::fmt::Display for LabelParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid label '{}', expected one of: stable, upward_anomaly, downward_anomaly",
            self.0
        )
    }
}

impl std::error::Error for LabelParseError {}

/// Number of bars per label in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCounts {
    /// Bars labeled `stable`.
    pub stable: usize,
    /// Bars labeled `upward_anomaly`.
    pub upward: usize,
    /// Bars labeled `downward_anomaly`.
    pub downward: usize,
}

impl LabelCounts {
    /// Adds one bar with the given label.
    pub const fn record(&mut self, label: Label) {
        match label {
            Label::Stable => self.stable += 1,
            Label::UpwardAnomaly => self.upward += 1,
            Label::DownwardAnomaly => self.downward += 1,
        }
    }

    /// Total number of bars counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.stable + self.upward + self.downward
    }

    /// Number of bars with either anomaly label.
    #[must_use]
    pub const fn anomalies(&self) -> usize {
        self.upward + self.downward
    }
}

impl std::ops::AddAssign for LabelCounts {
    fn add_assign(&mut self, other: Self) {
        self.stable += other.stable;
        self.upward += other.upward;
        self.downward += other.downward;
    }
}

impl FromIterator<Label> for LabelCounts {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut counts = Self::default();
        for label in iter {
            counts.record(label);
        }
        counts
    }
}
