//! Column-oriented feature table.

use chrono::{DateTime, Utc};

use crate::{Label, LabeledBar, TableError};

/// A named numeric column. Absent cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

impl Column {
    /// Creates a column.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name as written in the header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell values in row order.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Mutable cell values. The slice cannot change the column length.
    pub fn values_mut(&mut self) -> &mut [Option<f64>] {
        &mut self.values
    }

    /// Values with absent cells mapped to NaN.
    #[must_use]
    pub fn to_f64_lossy(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }
}

/// Per-asset table of timestamped feature columns with optional labels.
///
/// Every column and the label vector have exactly one entry per timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
    labels: Option<Vec<Label>>,
}

impl Table {
    /// Creates a table with the given row timestamps and no columns.
    #[must_use]
    pub const fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
            labels: None,
        }
    }

    /// Builds a table from labeled bars.
    ///
    /// Columns are `open`, `high`, `low`, `close`, `volume` and `pct_change`.
    #[must_use]
    pub fn from_labeled(bars: &[LabeledBar]) -> Self {
        let field = |f: fn(&LabeledBar) -> Option<f64>| bars.iter().map(f).collect::<Vec<_>>();

        Self {
            timestamps: bars.iter().map(|b| b.bar.timestamp).collect(),
            columns: vec![
                Column::new("open", field(|b| b.bar.open)),
                Column::new("high", field(|b| b.bar.high)),
                Column::new("low", field(|b| b.bar.low)),
                Column::new("close", field(|b| b.bar.close)),
                Column::new("volume", field(|b| b.bar.volume)),
                Column::new("pct_change", field(|b| b.pct_change)),
            ],
            labels: Some(bars.iter().map(|b| b.label).collect()),
        }
    }

    /// Attaches a label vector.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if `labels` does not have one
    /// entry per row.
    pub fn with_labels(mut self, labels: Vec<Label>) -> Result<Self, TableError> {
        if labels.len() != self.len() {
            return Err(TableError::LengthMismatch {
                name: "label".to_string(),
                expected: self.len(),
                actual: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Row timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Row labels, if the table carries any.
    #[must_use]
    pub fn labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    /// Feature columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable feature columns.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Looks up a column by name, ignoring ASCII case.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Looks up a column that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingColumn`] if no column matches `name`.
    pub fn require(&self, name: &str) -> Result<&Column, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the length differs from the row count or a column
    /// with the same name (ignoring case) exists.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push(Column::new(name, values));
        Ok(())
    }

    /// Returns true if every column has a value in row `index`.
    #[must_use]
    pub fn is_row_complete(&self, index: usize) -> bool {
        self.columns.iter().all(|c| c.values[index].is_some())
    }

    /// Removes every row that has an absent value in any column.
    ///
    /// Returns the number of rows removed.
    pub fn drop_incomplete_rows(&mut self) -> usize {
        let keep: Vec<bool> = (0..self.len()).map(|i| self.is_row_complete(i)).collect();
        self.retain_rows(&keep)
    }

    /// Keeps rows whose entry in `keep` is true. Returns the number removed.
    fn retain_rows(&mut self, keep: &[bool]) -> usize {
        let before = self.len();

        self.timestamps = retain(&self.timestamps, keep);
        for column in &mut self.columns {
            column.values = retain(&column.values, keep);
        }
        if let Some(labels) = self.labels.take() {
            self.labels = Some(retain(&labels, keep));
        }

        before - self.len()
    }
}

fn retain<T: Copy>(values: &[T], keep: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(keep)
        .filter_map(|(v, k)| k.then_some(*v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceBar;
    use chrono::{TimeDelta, TimeZone};

    fn hours(n: usize) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| start + TimeDelta::hours(i as i64))
            .collect()
    }

    #[test]
    fn test_from_labeled() {
        let ts = hours(2);
        let bars = vec![
            LabeledBar::new(
                PriceBar::new(ts[0], 1.0, 2.0, 0.5, 1.5, 10.0),
                Some(2.0),
                Label::UpwardAnomaly,
            ),
            LabeledBar::new(
                PriceBar::new(ts[1], 1.5, 2.0, 1.0, 1.53, 10.0),
                None,
                Label::Stable,
            ),
        ];

        let table = Table::from_labeled(&bars);
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 6);
        assert_eq!(table.require("Close").unwrap().values()[1], Some(1.53));
        assert_eq!(
            table.labels().unwrap(),
            &[Label::UpwardAnomaly, Label::Stable]
        );
    }

    #[test]
    fn test_push_column_rejects_bad_length() {
        let mut table = Table::new(hours(3));
        let err = table.push_column("x", vec![Some(1.0)]).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn test_push_column_rejects_duplicate() {
        let mut table = Table::new(hours(1));
        table.push_column("close", vec![Some(1.0)]).unwrap();
        let err = table.push_column("Close", vec![Some(2.0)]).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("Close".to_string()));
    }

    #[test]
    fn test_with_labels_checks_length() {
        let table = Table::new(hours(2));
        assert!(table.with_labels(vec![Label::Stable]).is_err());
    }

    #[test]
    fn test_drop_incomplete_rows() {
        let ts = hours(4);
        let mut table = Table::new(ts.clone())
            .with_labels(vec![
                Label::Stable,
                Label::UpwardAnomaly,
                Label::Stable,
                Label::DownwardAnomaly,
            ])
            .unwrap();
        table
            .push_column("a", vec![None, Some(1.0), Some(2.0), Some(3.0)])
            .unwrap();
        table
            .push_column("b", vec![Some(1.0), Some(1.0), None, Some(3.0)])
            .unwrap();

        let removed = table.drop_incomplete_rows();

        assert_eq!(removed, 2);
        assert_eq!(table.timestamps(), &[ts[1], ts[3]]);
        assert_eq!(
            table.labels().unwrap(),
            &[Label::UpwardAnomaly, Label::DownwardAnomaly]
        );
        assert_eq!(table.require("b").unwrap().values(), &[Some(1.0), Some(3.0)]);
    }
}
