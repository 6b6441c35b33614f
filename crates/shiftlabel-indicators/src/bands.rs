//! Bollinger Bands.

use crate::moving::{rolling_std, sma};

/// Bollinger Bands around a simple moving average.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Middle band minus `std_dev` standard deviations.
    pub lower: Vec<f64>,
    /// Simple moving average.
    pub middle: Vec<f64>,
    /// Middle band plus `std_dev` standard deviations.
    pub upper: Vec<f64>,
    /// Band width as a percentage of the middle band.
    pub bandwidth: Vec<f64>,
    /// Position of the close within the bands (0 at lower, 1 at upper).
    pub percent_b: Vec<f64>,
}

/// Computes Bollinger Bands with population standard deviation.
#[must_use]
pub fn bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let middle = sma(closes, period);
    let std = rolling_std(closes, period);

    let n = closes.len();
    let mut lower = Vec::with_capacity(n);
    let mut upper = Vec::with_capacity(n);
    let mut bandwidth = Vec::with_capacity(n);
    let mut percent_b = Vec::with_capacity(n);

    for i in 0..n {
        let l = middle[i] - std_dev * std[i];
        let u = middle[i] + std_dev * std[i];
        lower.push(l);
        upper.push(u);

        bandwidth.push(if middle[i] == 0.0 {
            f64::NAN
        } else {
            (u - l) / middle[i] * 100.0
        });

        percent_b.push(if u == l { 0.5 } else { (closes[i] - l) / (u - l) });
    }

    BollingerBands {
        lower,
        middle,
        upper,
        bandwidth,
        percent_b,
    }
}
