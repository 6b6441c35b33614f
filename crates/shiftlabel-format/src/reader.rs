//! Validating CSV readers.

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use shiftlabel_types::{Label, PriceBar, Table};
use std::io::Read;

use crate::{FormatError, parse_timestamp};

const TIMESTAMP_NAMES: &[&str] = &["timestamp", "datetime", "date"];
const LABEL_NAMES: &[&str] = &["label", "anomaly"];

/// Reads an OHLCV table.
///
/// The header must contain a timestamp column (`timestamp`, `datetime` or
/// `date`) and `open`, `high`, `low`, `close` and `volume`, matched without
/// regard to case. Other columns are ignored. Empty cells are read as absent
/// values.
///
/// # Errors
///
/// Returns [`FormatError::MissingColumn`] for an incomplete header and
/// [`FormatError::Malformed`] for the first row with a wrong field count, an
/// unparseable or non-increasing timestamp, a non-numeric, non-finite or
/// non-positive price, or a negative or non-finite volume.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>, FormatError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let ts_idx = find_any(&headers, TIMESTAMP_NAMES)
        .ok_or_else(|| FormatError::MissingColumn("timestamp".to_string()))?;
    let open = require(&headers, "open")?;
    let high = require(&headers, "high")?;
    let low = require(&headers, "low")?;
    let close = require(&headers, "close")?;
    let volume = require(&headers, "volume")?;

    let mut bars = Vec::new();
    let mut record = StringRecord::new();
    let mut line = 1;
    let mut previous: Option<DateTime<Utc>> = None;

    while next_record(&mut rdr, &mut record, &mut line)? {
        let timestamp = row_timestamp(&record, ts_idx, line, &mut previous)?;
        let price = |idx: usize, name: &str| -> Result<Option<f64>, FormatError> {
            match finite(&record, idx, name, line)? {
                Some(v) if v <= 0.0 => Err(malformed(line, format!("{name} must be positive, got {v}"))),
                value => Ok(value),
            }
        };

        let bar = PriceBar {
            timestamp,
            open: price(open, "open")?,
            high: price(high, "high")?,
            low: price(low, "low")?,
            close: price(close, "close")?,
            volume: match finite(&record, volume, "volume", line)? {
                Some(v) if v < 0.0 => {
                    return Err(malformed(line, format!("volume must not be negative, got {v}")));
                }
                v => v,
            },
        };
        bars.push(bar);
    }

    Ok(bars)
}

/// Reads a feature table.
///
/// The header must contain a timestamp column. A `label` (or `anomaly`)
/// column, when present, becomes the table's label vector and accepts label
/// names or the numeric codes `0`, `1` and `2`. Every other column is read as
/// a numeric feature; empty and non-finite cells are absent.
///
/// # Errors
///
/// Returns [`FormatError::MissingColumn`] without a timestamp column,
/// [`FormatError::Malformed`] for the first bad row and
/// [`FormatError::Table`] for duplicate column names.
pub fn read_table<R: Read>(reader: R) -> Result<Table, FormatError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let ts_idx = find_any(&headers, TIMESTAMP_NAMES)
        .ok_or_else(|| FormatError::MissingColumn("timestamp".to_string()))?;
    let label_idx = find_any(&headers, LABEL_NAMES);
    let feature_idx: Vec<usize> = (0..headers.len())
        .filter(|&i| i != ts_idx && Some(i) != label_idx)
        .collect();

    let mut timestamps = Vec::new();
    let mut labels = Vec::new();
    let mut features: Vec<Vec<Option<f64>>> = vec![Vec::new(); feature_idx.len()];
    let mut record = StringRecord::new();
    let mut line = 1;
    let mut previous: Option<DateTime<Utc>> = None;

    while next_record(&mut rdr, &mut record, &mut line)? {
        timestamps.push(row_timestamp(&record, ts_idx, line, &mut previous)?);

        if let Some(idx) = label_idx {
            let cell = &record[idx];
            let label = cell
                .parse::<Label>()
                .map_err(|e| malformed(line, e.to_string()))?;
            labels.push(label);
        }

        for (values, &idx) in features.iter_mut().zip(&feature_idx) {
            let value = number(&record, idx, &headers[idx], line)?;
            values.push(value.filter(|v| v.is_finite()));
        }
    }

    let mut table = Table::new(timestamps);
    for (values, &idx) in features.into_iter().zip(&feature_idx) {
        table.push_column(&headers[idx], values)?;
    }
    if label_idx.is_some() {
        table = table.with_labels(labels)?;
    }
    Ok(table)
}

/// Reads the next data row, tracking its line number.
///
/// A decoding error (such as a wrong field count) becomes
/// [`FormatError::Malformed`] at the offending line.
fn next_record<R: Read>(
    rdr: &mut csv::Reader<R>,
    record: &mut StringRecord,
    line: &mut u64,
) -> Result<bool, FormatError> {
    match rdr.read_record(record) {
        Ok(more) => {
            if let Some(position) = record.position() {
                *line = position.line();
            }
            Ok(more)
        }
        Err(err) => {
            let at = err.position().map_or(*line + 1, csv::Position::line);
            Err(malformed(at, err.to_string()))
        }
    }
}

fn row_timestamp(
    record: &StringRecord,
    idx: usize,
    line: u64,
    previous: &mut Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, FormatError> {
    let cell = &record[idx];
    let timestamp =
        parse_timestamp(cell).ok_or_else(|| malformed(line, format!("invalid timestamp '{cell}'")))?;

    if let Some(prev) = *previous
        && timestamp <= prev
    {
        return Err(malformed(
            line,
            format!("timestamp {timestamp} does not follow {prev}"),
        ));
    }
    *previous = Some(timestamp);
    Ok(timestamp)
}

/// Parses a numeric cell. Empty cells are absent.
fn number(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<Option<f64>, FormatError> {
    let cell = &record[idx];
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| malformed(line, format!("{name}: invalid number '{cell}'")))
}

/// Parses a numeric cell that must be finite when present.
fn finite(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<Option<f64>, FormatError> {
    match number(record, idx, name, line)? {
        Some(v) if !v.is_finite() => Err(malformed(line, format!("{name}: non-finite value '{}'", &record[idx]))),
        value => Ok(value),
    }
}

fn find_any(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

fn require(headers: &StringRecord, name: &str) -> Result<usize, FormatError> {
    find_any(headers, &[name]).ok_or_else(|| FormatError::MissingColumn(name.to_string()))
}

fn malformed(line: u64, reason: impl Into<String>) -> FormatError {
    FormatError::Malformed {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n";

    fn bars(rows: &str) -> Result<Vec<PriceBar>, FormatError> {
        read_bars(format!("{HEADER}{rows}").as_bytes())
    }

    fn malformed_line(err: FormatError) -> u64 {
        match err {
            FormatError::Malformed { line, .. } => line,
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn test_read_bars() {
        let result = bars(
            "2024-01-01 00:00:00,1.0,2.0,0.5,1.5,99,10\n\
             2024-01-01 01:00:00,1.5,2.5,1.0,2.0,99,0\n",
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0].close.unwrap(), 1.5);
        assert_relative_eq!(result[1].volume.unwrap(), 0.0);
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let result = bars("2024-01-01,1,2,0.5,,99,\n").unwrap();
        assert_eq!(result[0].close, None);
        assert_eq!(result[0].volume, None);
        assert!(!result[0].is_complete());
    }

    #[test]
    fn test_header_only() {
        assert!(bars("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        let err = read_bars("timestamp,open,high,low,volume\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::MissingColumn(ref c) if c == "close"));

        let err = read_bars("when,open,high,low,close,volume\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::MissingColumn(ref c) if c == "timestamp"));
    }

    #[test]
    fn test_non_numeric_price_reports_line() {
        let err = bars(
            "2024-01-01 00:00:00,1,2,0.5,1.5,99,10\n\
             2024-01-01 01:00:00,1,2,0.5,abc,99,10\n",
        )
        .unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn test_non_positive_price() {
        let err = bars("2024-01-01,0,2,0.5,1.5,99,10\n").unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn test_non_finite_close_is_rejected() {
        for cell in ["NaN", "inf", "-inf"] {
            let err = bars(&format!(
                "2024-01-01 00:00:00,1,2,0.5,1.5,99,10\n\
                 2024-01-01 01:00:00,1,2,0.5,{cell},99,10\n"
            ))
            .unwrap_err();
            assert_eq!(malformed_line(err), 3, "close = {cell}");
        }
    }

    #[test]
    fn test_non_finite_volume_is_rejected() {
        for cell in ["NaN", "inf", "-inf"] {
            let err = bars(&format!("2024-01-01,1,2,0.5,1.5,99,{cell}\n")).unwrap_err();
            assert!(
                matches!(&err, FormatError::Malformed { line: 2, reason } if reason.contains("volume")),
                "volume = {cell}: {err:?}"
            );
        }
    }

    #[test]
    fn test_negative_volume() {
        let err = bars("2024-01-01,1,2,0.5,1.5,99,-1\n").unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn test_non_increasing_timestamps() {
        let err = bars(
            "2024-01-01 01:00:00,1,2,0.5,1.5,99,10\n\
             2024-01-01 01:00:00,1,2,0.5,1.5,99,10\n",
        )
        .unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn test_bad_timestamp() {
        let err = bars("soon,1,2,0.5,1.5,99,10\n").unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = bars(
            "2024-01-01 00:00:00,1,2,0.5,1.5,99,10\n\
             2024-01-01 01:00:00,1,2\n",
        )
        .unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn test_read_table_with_labels() {
        let input = "timestamp,close,RSI_14,label\n\
                     2024-01-01T00:00:00Z,1.5,,stable\n\
                     2024-01-01T01:00:00Z,1.6,55.5,upward_anomaly\n\
                     2024-01-01T02:00:00Z,1.7,NaN,2\n";
        let table = read_table(input.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns().len(), 2);
        assert_eq!(
            table.labels().unwrap(),
            &[Label::Stable, Label::UpwardAnomaly, Label::DownwardAnomaly]
        );
        let rsi = table.require("rsi_14").unwrap().values();
        assert_eq!(rsi[0], None);
        assert_eq!(rsi[1], Some(55.5));
        assert_eq!(rsi[2], None);
    }

    #[test]
    fn test_read_table_without_labels() {
        let input = "date,close\n2024-01-01,1.0\n2024-01-02,2.0\n";
        let table = read_table(input.as_bytes()).unwrap();
        assert!(table.labels().is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_table_bad_label() {
        let input = "timestamp,close,label\n2024-01-01,1.0,sideways\n";
        let err = read_table(input.as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn test_read_table_duplicate_column() {
        let input = "timestamp,close,Close\n2024-01-01,1.0,1.0\n";
        let err = read_table(input.as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::Table(_)));
    }
}
