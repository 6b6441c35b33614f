//! TOML-backed settings.

use serde::{Deserialize, Serialize};
use shiftlabel_format::OutputFormat;
use shiftlabel_indicators::IndicatorConfig;
use shiftlabel_transform::TransformConfig;
use shiftlabel_types::{ConfigError, DEFAULT_SHIFT_HOURS, DEFAULT_THRESHOLD, LabelConfig};
use std::path::Path;

use crate::PipelineError;

/// Default number of files processed concurrently.
pub const DEFAULT_PARALLEL: usize = 4;

/// Label stage settings.
///
/// Values are kept as written so that a negative window can be reported
/// instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelSettings {
    /// Percentage magnitude separating stable from anomalous changes.
    pub threshold: f64,
    /// Rows before an anomaly that inherit its label.
    pub shift_hours: i64,
    /// Forward/back-fill absent OHLCV values before labeling.
    pub fill_missing: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            shift_hours: DEFAULT_SHIFT_HOURS as i64,
            fill_missing: false,
        }
    }
}

impl LabelSettings {
    /// Builds the validated labeling configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a negative or non-finite threshold or a
    /// negative window.
    pub fn config(&self) -> Result<LabelConfig, ConfigError> {
        LabelConfig::new(self.threshold, self.shift_hours)
    }
}

/// Settings shared by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    /// Output format.
    pub format: OutputFormat,
    /// Files processed concurrently.
    pub parallel: usize,
    /// Drop enriched rows that have any absent value.
    pub drop_incomplete: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            parallel: DEFAULT_PARALLEL,
            drop_incomplete: true,
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// `[label]` table.
    pub label: LabelSettings,
    /// `[indicators]` table.
    pub indicators: IndicatorConfig,
    /// `[transform]` table.
    pub transform: TransformConfig,
    /// `[pipeline]` table.
    pub pipeline: PipelineSettings,
}

impl Settings {
    /// Parses settings from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Settings`] for invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be read and
    /// [`PipelineError::Settings`] if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Checks every value. Run this before touching any file.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.label.config()?;
        self.indicators.validate()?;
        if self.pipeline.parallel == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "parallel".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
