//! Synthetic data for shiftlabel benchmarks.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use shiftlabel_lib::{PriceBar, Table};

/// Deterministic pseudo-random walk of hourly bars.
///
/// Roughly one bar in ten moves by more than 1%, so labeling exercises
/// overlapping propagation windows.
pub fn synthetic_bars(n: usize, seed: u64) -> Vec<PriceBar> {
    let start = start_time();
    let mut state = seed.max(1);
    let mut close = 100.0_f64;

    (0..n)
        .map(|i| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;

            let step = (unit - 0.5) * 0.035;
            let open = close;
            close *= 1.0 + step;
            let high = open.max(close) * 1.002;
            let low = open.min(close) * 0.998;
            let volume = 1_000.0 + unit * 500.0;

            PriceBar::new(start + TimeDelta::hours(i as i64), open, high, low, close, volume)
        })
        .collect()
}

/// Synthetic bars rendered as an OHLCV CSV table.
pub fn synthetic_csv(n: usize, seed: u64) -> String {
    let mut csv = String::from("timestamp,open,high,low,close,volume\n");
    for bar in synthetic_bars(n, seed) {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open.unwrap_or_default(),
            bar.high.unwrap_or_default(),
            bar.low.unwrap_or_default(),
            bar.close.unwrap_or_default(),
            bar.volume.unwrap_or_default(),
        ));
    }
    csv
}

/// Labeled synthetic bars as a feature table.
pub fn synthetic_table(n: usize, seed: u64) -> Table {
    let labeler = shiftlabel_lib::Labeler::default();
    Table::from_labeled(&labeler.label(&synthetic_bars(n, seed)))
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}
