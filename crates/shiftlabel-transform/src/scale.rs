//! Robust (median / IQR) scaling.

use shiftlabel_types::{ConfigError, Table};

/// Fitted centre and scale of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnScale {
    /// Median of the fitted values.
    pub center: f64,
    /// Interquartile range, or 1 when the range is zero.
    pub scale: f64,
}

impl ColumnScale {
    /// Scales one value.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.center) / self.scale
    }
}

/// Scales columns by removing the median and dividing by the interquartile
/// range, which keeps outliers from dominating the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustScaler {
    lower_quantile: f64,
    upper_quantile: f64,
}

impl Default for RobustScaler {
    fn default() -> Self {
        Self {
            lower_quantile: 25.0,
            upper_quantile: 75.0,
        }
    }
}

impl RobustScaler {
    /// Creates a scaler with the default 25th-75th percentile range.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scaler with a custom percentile range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] unless
    /// `0 <= lower < upper <= 100`.
    pub fn with_quantile_range(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if !(0.0..=100.0).contains(&lower) || !(0.0..=100.0).contains(&upper) || lower >= upper {
            return Err(ConfigError::InvalidParameter {
                name: "quantile_range".to_string(),
                reason: format!("expected 0 <= lower < upper <= 100, got ({lower}, {upper})"),
            });
        }
        Ok(Self {
            lower_quantile: lower,
            upper_quantile: upper,
        })
    }

    /// Fits centre and scale on the present, finite values of a column.
    ///
    /// An all-absent column fits to the identity transform.
    #[must_use]
    pub fn fit(&self, values: &[Option<f64>]) -> ColumnScale {
        let mut sorted: Vec<f64> = values.iter().flatten().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return ColumnScale {
                center: 0.0,
                scale: 1.0,
            };
        }
        sorted.sort_by(f64::total_cmp);

        let range = percentile(&sorted, self.upper_quantile) - percentile(&sorted, self.lower_quantile);
        ColumnScale {
            center: percentile(&sorted, 50.0),
            scale: if range == 0.0 { 1.0 } else { range },
        }
    }

    /// Fits and scales every feature column of `table` in place.
    ///
    /// Labels are not touched. Returns the fitted scale of each column in
    /// column order.
    pub fn fit_transform(&self, table: &mut Table) -> Vec<ColumnScale> {
        table
            .columns_mut()
            .iter_mut()
            .map(|column| {
                let scale = self.fit(column.values());
                for cell in column.values_mut() {
                    *cell = cell.map(|v| scale.apply(v));
                }
                scale
            })
            .collect()
    }
}

/// Linear-interpolated percentile of sorted values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
