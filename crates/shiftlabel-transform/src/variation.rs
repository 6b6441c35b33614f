//! Row-over-row percent variation.

use serde::{Deserialize, Serialize};
use shiftlabel_types::{Table, TableError};

/// Transform stage parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Columns without a percent-variation column (matched ignoring case).
    ///
    /// Volume is excluded by default: a zero volume makes the next change
    /// undefined for every following row.
    pub exclude: Vec<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["volume".to_string()],
        }
    }
}

impl TransformConfig {
    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e.eq_ignore_ascii_case(name))
    }
}

/// Appends `{name}_pct_change = (x[t] - x[t-1]) / x[t-1]` for every
/// non-excluded column, then drops every row with an absent value.
///
/// The first row never has a previous value, so a non-empty result always
/// has fewer rows than its input.
///
/// # Errors
///
/// Returns [`TableError::DuplicateColumn`] if a `_pct_change` column to be
/// added already exists.
pub fn percent_variation(table: &Table, config: &TransformConfig) -> Result<Table, TableError> {
    let variations: Vec<(String, Vec<Option<f64>>)> = table
        .columns()
        .iter()
        .filter(|c| !config.is_excluded(c.name()))
        .map(|c| (format!("{}_pct_change", c.name()), variation(c.values())))
        .collect();

    let mut transformed = table.clone();
    for (name, values) in variations {
        transformed.push_column(name, values)?;
    }
    transformed.drop_incomplete_rows();
    Ok(transformed)
}

fn variation(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(values.len());
    if !values.is_empty() {
        result.push(None);
    }
    for pair in values.windows(2) {
        result.push(match (pair[0], pair[1]) {
            (Some(prev), Some(current)) if prev != 0.0 => Some((current - prev) / prev),
            _ => None,
        });
    }
    result
}
