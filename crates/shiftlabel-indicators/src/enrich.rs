//! Table enrichment.

use serde::{Deserialize, Serialize};
use shiftlabel_types::{ConfigError, Table, TableError};

use crate::bands::bollinger_bands;
use crate::moving::{ema, sma};
use crate::oscillators::{cmo, macd, momentum, rsi, ultimate_oscillator};

/// Indicator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Lengths used for SMA, EMA, RSI and CMO.
    pub periods: Vec<usize>,
    /// MACD fast EMA length.
    pub macd_fast: usize,
    /// MACD slow EMA length.
    pub macd_slow: usize,
    /// MACD signal EMA length.
    pub macd_signal: usize,
    /// Momentum look-back.
    pub momentum_length: usize,
    /// Ultimate oscillator windows (fast, medium, slow).
    pub uo_windows: [usize; 3],
    /// Bollinger Band length.
    pub bbands_length: usize,
    /// Bollinger Band width in standard deviations.
    pub bbands_std: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            periods: vec![5, 12, 13, 14, 20, 21, 26, 30, 50, 100, 200],
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            momentum_length: 10,
            uo_windows: [7, 14, 28],
            bbands_length: 5,
            bbands_std: 2.0,
        }
    }
}

impl IndicatorConfig {
    /// Checks that every length is positive and the band width is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = self
            .periods
            .iter()
            .map(|&p| ("periods", p))
            .chain([
                ("macd_fast", self.macd_fast),
                ("macd_slow", self.macd_slow),
                ("macd_signal", self.macd_signal),
                ("momentum_length", self.momentum_length),
                ("uo_windows", self.uo_windows[0]),
                ("uo_windows", self.uo_windows[1]),
                ("uo_windows", self.uo_windows[2]),
                ("bbands_length", self.bbands_length),
            ]);

        for (name, value) in lengths {
            if value == 0 {
                return Err(invalid(name, "must be at least 1"));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(invalid("macd_fast", "must be shorter than macd_slow"));
        }
        if !self.bbands_std.is_finite() || self.bbands_std <= 0.0 {
            return Err(invalid("bbands_std", "must be a positive number"));
        }
        Ok(())
    }

    /// Names of the columns [`enrich`] appends, in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        names.extend(self.periods.iter().map(|p| format!("SMA_{p}")));
        names.extend(self.periods.iter().map(|p| format!("EMA_{p}")));
        names.extend(["MACD", "MACD_signal", "MACD_diff"].map(String::from));
        names.extend(self.periods.iter().map(|p| format!("RSI_{p}")));
        names.push("MOM".to_string());
        names.extend(self.periods.iter().map(|p| format!("CMO_{p}")));
        names.push("UO".to_string());
        let suffix = format!("{}_{:.1}", self.bbands_length, self.bbands_std);
        names.extend(["BBL", "BBM", "BBU", "BBB", "BBP"].map(|b| format!("{b}_{suffix}")));
        names
    }
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Returns a copy of `table` with every configured indicator appended.
///
/// Requires `high`, `low` and `close` columns. Warm-up positions and
/// positions that depend on an absent input are absent in the output.
///
/// # Errors
///
/// Returns a [`TableError`] if a required column is missing or an indicator
/// column name already exists in the table.
pub fn enrich(table: &Table, config: &IndicatorConfig) -> Result<Table, TableError> {
    let closes = table.require("close")?.to_f64_lossy();
    let highs = table.require("high")?.to_f64_lossy();
    let lows = table.require("low")?.to_f64_lossy();

    let mut computed: Vec<Vec<f64>> = Vec::new();
    computed.extend(config.periods.iter().map(|&p| sma(&closes, p)));
    computed.extend(config.periods.iter().map(|&p| ema(&closes, p)));

    let macd = macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal);
    computed.extend([macd.line, macd.signal, macd.histogram]);

    computed.extend(config.periods.iter().map(|&p| rsi(&closes, p)));
    computed.push(momentum(&closes, config.momentum_length));
    computed.extend(config.periods.iter().map(|&p| cmo(&closes, p)));

    let [fast, medium, slow] = config.uo_windows;
    computed.push(ultimate_oscillator(&highs, &lows, &closes, fast, medium, slow));

    let bands = bollinger_bands(&closes, config.bbands_length, config.bbands_std);
    computed.extend([
        bands.lower,
        bands.middle,
        bands.upper,
        bands.bandwidth,
        bands.percent_b,
    ]);

    let mut enriched = table.clone();
    for (name, values) in config.column_names().into_iter().zip(computed) {
        enriched.push_column(name, to_cells(&values))?;
    }
    Ok(enriched)
}

fn to_cells(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| v.is_finite().then_some(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn price_table(n: usize) -> Table {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps = (0..n).map(|i| start + TimeDelta::hours(i as i64)).collect();
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 / 7.0).sin() * 3.0).collect();

        let mut table = Table::new(timestamps);
        table
            .push_column("High", closes.iter().map(|c| Some(c + 0.5)).collect())
            .unwrap();
        table
            .push_column("Low", closes.iter().map(|c| Some(c - 0.5)).collect())
            .unwrap();
        table
            .push_column("Close", closes.into_iter().map(Some).collect())
            .unwrap();
        table
    }

    #[test]
    fn test_default_column_names() {
        let names = IndicatorConfig::default().column_names();
        assert_eq!(names.len(), 11 * 4 + 3 + 1 + 1 + 5);
        assert_eq!(names[0], "SMA_5");
        assert!(names.contains(&"MACD_diff".to_string()));
        assert_eq!(names.last().unwrap(), "BBP_5_2.0");
    }

    #[test]
    fn test_enrich_appends_columns() {
        let config = IndicatorConfig {
            periods: vec![3, 5],
            ..IndicatorConfig::default()
        };
        let table = price_table(60);

        let enriched = enrich(&table, &config).unwrap();

        assert_eq!(enriched.len(), 60);
        assert_eq!(
            enriched.columns().len(),
            3 + config.column_names().len()
        );
        let sma = enriched.require("SMA_3").unwrap().values();
        assert!(sma[1].is_none());
        assert!(sma[2].is_some());
    }

    #[test]
    fn test_warm_up_rows_are_dropped_by_caller() {
        let config = IndicatorConfig {
            periods: vec![5],
            ..IndicatorConfig::default()
        };
        let mut enriched = enrich(&price_table(60), &config).unwrap();
        let removed = enriched.drop_incomplete_rows();

        // MACD signal is the longest warm-up: 26 + 9 - 1 rows before the first value
        assert_eq!(removed, 33);
        assert_eq!(enriched.len(), 27);
    }

    #[test]
    fn test_missing_close_column() {
        let table = Table::new(Vec::new());
        let err = enrich(&table, &IndicatorConfig::default()).unwrap_err();
        assert_eq!(err, TableError::MissingColumn("close".to_string()));
    }

    #[test]
    fn test_validate() {
        assert!(IndicatorConfig::default().validate().is_ok());

        let zero = IndicatorConfig {
            periods: vec![5, 0],
            ..IndicatorConfig::default()
        };
        assert!(zero.validate().is_err());

        let inverted = IndicatorConfig {
            macd_fast: 30,
            ..IndicatorConfig::default()
        };
        assert!(inverted.validate().is_err());
    }
}
