//! CSV output format.

use csv::WriterBuilder;
use shiftlabel_types::{LabeledBar, Table};
use std::fmt;
use std::io::Write;

use crate::{FormatError, Formatter, format_timestamp};

/// An optional number written as an empty cell when absent.
struct Cell(Option<f64>);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => Ok(()),
        }
    }
}

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_labeled<W: Write + Send>(
        &self,
        bars: &[LabeledBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = char::from(self.delimiter);

        if self.include_header {
            writeln!(
                writer,
                "timestamp{d}open{d}high{d}low{d}close{d}volume{d}pct_change{d}label"
            )?;
        }

        for labeled in bars {
            let bar = &labeled.bar;
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                format_timestamp(&bar.timestamp),
                Cell(bar.open),
                Cell(bar.high),
                Cell(bar.low),
                Cell(bar.close),
                Cell(bar.volume),
                Cell(labeled.pct_change),
                labeled.label
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Header names are quoted when they contain the delimiter or a quote.
    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError> {
        let labels = table.labels();
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer);

        if self.include_header {
            wtr.write_field("timestamp")?;
            for column in table.columns() {
                wtr.write_field(column.name())?;
            }
            if labels.is_some() {
                wtr.write_field("label")?;
            }
            wtr.write_record(None::<&[u8]>)?;
        }

        for (row, timestamp) in table.timestamps().iter().enumerate() {
            wtr.write_field(format_timestamp(timestamp))?;
            for column in table.columns() {
                wtr.write_field(Cell(column.values()[row]).to_string())?;
            }
            if let Some(labels) = labels {
                wtr.write_field(labels[row].to_string())?;
            }
            wtr.write_record(None::<&[u8]>)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shiftlabel_types::{Label, PriceBar};
    use std::io::Cursor;

    fn create_test_bar() -> LabeledBar {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let bar = PriceBar::new(timestamp, 100.0, 101.5, 99.0, 100.5, 12.25);
        LabeledBar::new(bar, Some(1.5), Label::UpwardAnomaly)
    }

    #[test]
    fn test_csv_labeled() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_labeled(&[create_test_bar()], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            result,
            "timestamp,open,high,low,close,volume,pct_change,label\n\
             2024-01-15T12:00:00Z,100,101.5,99,100.5,12.25,1.5,upward_anomaly\n"
        );
    }

    #[test]
    fn test_absent_values_are_empty_cells() {
        let mut bar = create_test_bar();
        bar.bar.volume = None;
        bar.pct_change = None;
        bar.label = Label::Stable;
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new()
            .with_header(false)
            .write_labeled(&[bar], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result, "2024-01-15T12:00:00Z,100,101.5,99,100.5,,,stable\n");
    }

    #[test]
    fn test_csv_table() {
        let table = Table::from_labeled(&[create_test_bar()]);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_table(&table, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let mut lines = result.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,open,high,low,close,volume,pct_change,label")
        );
        assert_eq!(
            lines.next(),
            Some("2024-01-15T12:00:00Z,100,101.5,99,100.5,12.25,1.5,upward_anomaly")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_table_writes_header() {
        let table = Table::from_labeled(&[]);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_table(&table, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            result,
            "timestamp,open,high,low,close,volume,pct_change,label\n"
        );
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_labeled(&[create_test_bar()], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("timestamp\topen\thigh"));
    }

    #[test]
    fn test_table_header_with_delimiter_is_quoted() {
        let input = "timestamp,\"a,b\",close\n2024-01-15 12:00:00,1.5,100\n";
        let table = crate::read_table(input.as_bytes()).unwrap();
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_table(&table, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            result,
            "timestamp,\"a,b\",close\n2024-01-15T12:00:00Z,1.5,100\n"
        );

        let reread = crate::read_table(result.as_bytes()).unwrap();
        assert_eq!(reread.columns()[0].name(), "a,b");
        assert_eq!(reread.require("close").unwrap().values(), &[Some(100.0)]);
    }

    #[test]
    fn test_tsv_table() {
        let table = Table::from_labeled(&[create_test_bar()]);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::tsv().write_table(&table, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("timestamp\topen\thigh"));
        assert!(result.ends_with("1.5\tupward_anomaly\n"));
    }
}
