//! Labeling configuration.

use serde::Serialize;

use crate::ConfigError;

/// Default anomaly threshold, in percent.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Default curve-shift window, in bars.
pub const DEFAULT_SHIFT_HOURS: usize = 4;

/// Validated labeling parameters.
///
/// Construct with [`LabelConfig::new`] to reject negative or non-finite
/// values; the fields are private so a `LabelConfig` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelConfig {
    threshold: f64,
    shift_hours: usize,
}

impl LabelConfig {
    /// Creates a configuration from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `threshold` is negative or not finite, or if
    /// `shift_hours` is negative.
    pub fn new(threshold: f64, shift_hours: i64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold(threshold));
        }
        if threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(threshold));
        }
        let shift_hours =
            usize::try_from(shift_hours).map_err(|_| ConfigError::NegativeShift(shift_hours))?;

        Ok(Self {
            threshold,
            shift_hours,
        })
    }

    /// Percentage magnitude separating stable from anomalous bars.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of bars preceding an anomaly that inherit its label.
    #[must_use]
    pub const fn shift_hours(&self) -> usize {
        self.shift_hours
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            shift_hours: DEFAULT_SHIFT_HOURS,
        }
    }
}
