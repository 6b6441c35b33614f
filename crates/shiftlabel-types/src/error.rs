//! Error types for shiftlabel.

use thiserror::Error;

/// Invalid pipeline configuration.
///
/// These are raised before any input file is opened.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The anomaly threshold is negative.
    #[error("Invalid threshold {0}: must be a non-negative percentage")]
    NegativeThreshold(f64),

    /// The anomaly threshold is NaN or infinite.
    #[error("Invalid threshold {0}: must be finite")]
    NonFiniteThreshold(f64),

    /// The curve-shift window is negative.
    #[error("Invalid shift_hours {0}: must be >= 0")]
    NegativeShift(i64),

    /// An indicator or scaler parameter is out of range.
    #[error("Invalid {name}: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised by [`Table`](crate::Table) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A column's length differs from the table's row count.
    #[error("Column '{name}' has {actual} values, table has {expected} rows")]
    LengthMismatch {
        /// The column name.
        name: String,
        /// The table's row count.
        expected: usize,
        /// The column's length.
        actual: usize,
    },

    /// A column with the same name already exists.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A required column is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}
