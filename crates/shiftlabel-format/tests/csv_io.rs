//! Labeled output written as CSV must be readable as the next stage's input.

use chrono::{TimeDelta, TimeZone, Utc};
use shiftlabel_format::{CsvFormatter, Formatter, read_bars, read_table};
use shiftlabel_types::{Label, LabeledBar, PriceBar};

fn labeled_series() -> Vec<LabeledBar> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let labels = [Label::UpwardAnomaly, Label::Stable, Label::DownwardAnomaly];
    (0..3)
        .map(|i| {
            let close = if i == 1 { None } else { Some(10.0 + i as f64) };
            let mut bar = PriceBar::from_close(start + TimeDelta::hours(i), close);
            bar.volume = Some(3.5);
            LabeledBar::new(bar, Some(0.25 * i as f64), labels[i as usize])
        })
        .collect()
}

#[test]
fn test_labeled_csv_reads_back_as_table() {
    let bars = labeled_series();
    let mut buffer = Vec::new();
    CsvFormatter::new().write_labeled(&bars, &mut buffer).unwrap();

    let table = read_table(buffer.as_slice()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.labels().unwrap(),
        &[Label::UpwardAnomaly, Label::Stable, Label::DownwardAnomaly]
    );
    assert_eq!(table.timestamps()[2], bars[2].bar.timestamp);
    assert_eq!(table.require("close").unwrap().values(), &[Some(10.0), None, Some(12.0)]);
    assert_eq!(
        table.require("pct_change").unwrap().values(),
        &[Some(0.0), Some(0.25), Some(0.5)]
    );
}

#[test]
fn test_labeled_csv_reads_back_as_bars() {
    let bars = labeled_series();
    let mut buffer = Vec::new();
    CsvFormatter::new().write_labeled(&bars, &mut buffer).unwrap();

    let read = read_bars(buffer.as_slice()).unwrap();

    let expected: Vec<PriceBar> = bars.iter().map(|b| b.bar).collect();
    assert_eq!(read, expected);
}
