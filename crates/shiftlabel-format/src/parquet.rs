//! Apache Parquet output format.

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use shiftlabel_types::{Label, LabeledBar, Table};
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
///
/// Numeric columns are nullable `Float64`; labels are written as strings.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

fn parquet_err(e: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(e.to_string())
}

fn timestamp_field() -> Field {
    Field::new(
        "timestamp",
        DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
        false,
    )
}

fn label_array(labels: impl Iterator<Item = Label>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(labels.map(|l| l.as_str())))
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for labeled bars.
    fn labeled_schema() -> Schema {
        let mut fields = vec![timestamp_field()];
        fields.extend(
            ["open", "high", "low", "close", "volume", "pct_change"]
                .map(|name| Field::new(name, DataType::Float64, true)),
        );
        fields.push(Field::new("label", DataType::Utf8, false));
        Schema::new(fields)
    }

    /// Creates the Arrow schema for a feature table.
    fn table_schema(table: &Table) -> Schema {
        let mut fields = vec![timestamp_field()];
        fields.extend(
            table
                .columns()
                .iter()
                .map(|c| Field::new(c.name(), DataType::Float64, true)),
        );
        if table.labels().is_some() {
            fields.push(Field::new("label", DataType::Utf8, false));
        }
        Schema::new(fields)
    }

    /// Converts labeled bars to an Arrow RecordBatch.
    fn labeled_to_batch(schema: SchemaRef, bars: &[LabeledBar]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = bars
            .iter()
            .map(|b| b.bar.timestamp.timestamp_micros())
            .collect();
        let numeric = |f: fn(&LabeledBar) -> Option<f64>| -> ArrayRef {
            Arc::new(bars.iter().map(f).collect::<Float64Array>())
        };

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
                numeric(|b| b.bar.open),
                numeric(|b| b.bar.high),
                numeric(|b| b.bar.low),
                numeric(|b| b.bar.close),
                numeric(|b| b.bar.volume),
                numeric(|b| b.pct_change),
                label_array(bars.iter().map(|b| b.label)),
            ],
        )
        .map_err(parquet_err)
    }

    /// Converts a whole table to an Arrow RecordBatch.
    fn table_to_batch(schema: SchemaRef, table: &Table) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = table
            .timestamps()
            .iter()
            .map(chrono::DateTime::timestamp_micros)
            .collect();

        let mut arrays: Vec<ArrayRef> = vec![Arc::new(
            TimestampMicrosecondArray::from(timestamps).with_timezone("UTC"),
        )];
        arrays.extend(
            table
                .columns()
                .iter()
                .map(|c| Arc::new(Float64Array::from(c.values().to_vec())) as ArrayRef),
        );
        if let Some(labels) = table.labels() {
            arrays.push(label_array(labels.iter().copied()));
        }

        RecordBatch::try_new(schema, arrays).map_err(parquet_err)
    }

    fn writer<W: Write + Send>(
        &self,
        writer: W,
        schema: SchemaRef,
    ) -> Result<ArrowWriter<W>, FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        ArrowWriter::try_new(writer, schema, Some(props)).map_err(parquet_err)
    }
}

impl Formatter for ParquetFormatter {
    fn write_labeled<W: Write + Send>(
        &self,
        bars: &[LabeledBar],
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::labeled_schema());
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        // Write in batches
        for chunk in bars.chunks(self.row_group_size.max(1)) {
            let batch = Self::labeled_to_batch(Arc::clone(&schema), chunk)?;
            arrow_writer.write(&batch).map_err(parquet_err)?;
        }

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }

    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(Self::table_schema(table));
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        if !table.is_empty() {
            let batch = Self::table_to_batch(schema, table)?;
            let step = self.row_group_size.max(1);
            let mut offset = 0;
            while offset < batch.num_rows() {
                let len = step.min(batch.num_rows() - offset);
                arrow_writer
                    .write(&batch.slice(offset, len))
                    .map_err(parquet_err)?;
                offset += len;
            }
        }

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shiftlabel_types::PriceBar;
    use std::io::Cursor;

    fn create_test_bar() -> LabeledBar {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let bar = PriceBar::new(timestamp, 100.0, 101.5, 99.0, 100.5, 12.25);
        LabeledBar::new(bar, None, Label::Stable)
    }

    #[test]
    fn test_parquet_labeled() {
        let formatter = ParquetFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_labeled(&[create_test_bar()], &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_parquet_table_in_small_row_groups() {
        let bars = vec![create_test_bar(); 5];
        let table = Table::from_labeled(&bars);
        let mut output = Cursor::new(Vec::new());

        ParquetFormatter::new()
            .with_row_group_size(2)
            .write_table(&table, &mut output)
            .unwrap();

        let data = output.into_inner();
        assert_eq!(&data[data.len() - 4..], b"PAR1");
    }

    #[test]
    fn test_labeled_schema() {
        let schema = ParquetFormatter::labeled_schema();
        assert_eq!(schema.fields().len(), 8);
        assert!(schema.field_with_name("pct_change").unwrap().is_nullable());
        assert_eq!(
            schema.field_with_name("label").unwrap().data_type(),
            &DataType::Utf8
        );
    }

    #[test]
    fn test_table_schema_follows_columns() {
        let table = Table::from_labeled(&[create_test_bar()]);
        let schema = ParquetFormatter::table_schema(&table);
        assert_eq!(schema.fields().len(), 1 + table.columns().len() + 1);
        assert_eq!(schema.field(1).name(), "open");
    }
}
