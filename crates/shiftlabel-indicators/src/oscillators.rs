//! Momentum oscillators.

use crate::moving::{ema, rolling_sum, wilder};

/// MACD line, signal line and histogram.
#[derive(Debug, Clone)]
pub struct Macd {
    /// Fast EMA minus slow EMA.
    pub line: Vec<f64>,
    /// EMA of the MACD line.
    pub signal: Vec<f64>,
    /// MACD line minus signal line.
    pub histogram: Vec<f64>,
}

/// Moving Average Convergence Divergence.
#[must_use]
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(m, s)| m - s).collect();

    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}

/// Splits close-to-close changes into gains and losses.
///
/// Index 0 has no previous close and is NaN in both outputs.
fn gains_and_losses(closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    if !closes.is_empty() {
        gains.push(f64::NAN);
        losses.push(f64::NAN);
    }

    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change.is_nan() { f64::NAN } else { change.max(0.0) });
        losses.push(if change.is_nan() { f64::NAN } else { (-change).max(0.0) });
    }

    (gains, losses)
}

/// Relative Strength Index with Wilder smoothing.
///
/// A window with neither gains nor losses reads 50.
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_and_losses(closes);
    let avg_gain = wilder(&gains, period);
    let avg_loss = wilder(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            if gain.is_nan() || loss.is_nan() {
                f64::NAN
            } else if loss == 0.0 && gain == 0.0 {
                50.0
            } else if loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + gain / loss)
            }
        })
        .collect()
}

/// Momentum: `close[t] - close[t - length]`.
#[must_use]
pub fn momentum(closes: &[f64], length: usize) -> Vec<f64> {
    (0..closes.len())
        .map(|i| {
            if i >= length {
                closes[i] - closes[i - length]
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// Chande Momentum Oscillator over `length` close-to-close changes.
#[must_use]
pub fn cmo(closes: &[f64], length: usize) -> Vec<f64> {
    let (gains, losses) = gains_and_losses(closes);
    let up = rolling_sum(&gains, length);
    let down = rolling_sum(&losses, length);

    up.iter()
        .zip(&down)
        .map(|(&u, &d)| {
            let total = u + d;
            if total.is_nan() {
                f64::NAN
            } else if total == 0.0 {
                0.0
            } else {
                100.0 * (u - d) / total
            }
        })
        .collect()
}

/// Ultimate Oscillator with three averaging windows weighted 4:2:1.
#[must_use]
pub fn ultimate_oscillator(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    fast: usize,
    medium: usize,
    slow: usize,
) -> Vec<f64> {
    let n = closes.len().min(highs.len()).min(lows.len());
    let mut buying_pressure = vec![f64::NAN; n];
    let mut true_range = vec![f64::NAN; n];

    for i in 1..n {
        let prev_close = closes[i - 1];
        let true_low = lows[i].min(prev_close);
        let true_high = highs[i].max(prev_close);
        if prev_close.is_nan() || lows[i].is_nan() || highs[i].is_nan() {
            continue;
        }
        buying_pressure[i] = closes[i] - true_low;
        true_range[i] = true_high - true_low;
    }

    let average = |period: usize| -> Vec<f64> {
        let bp = rolling_sum(&buying_pressure, period);
        let tr = rolling_sum(&true_range, period);
        bp.iter()
            .zip(&tr)
            .map(|(&b, &t)| if t == 0.0 { f64::NAN } else { b / t })
            .collect()
    };

    let fast_avg = average(fast);
    let medium_avg = average(medium);
    let slow_avg = average(slow);

    (0..n)
        .map(|i| 100.0 * (4.0 * fast_avg[i] + 2.0 * medium_avg[i] + slow_avg[i]) / 7.0)
        .collect()
}
