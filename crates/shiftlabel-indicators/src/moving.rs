//! Rolling-window statistics and moving averages.
//!
//! Every function returns a vector of the input's length. Positions without a
//! full window are NaN, and a NaN inside a window makes that position NaN.

/// Applies `f` to each full window ending at every position.
fn rolling(data: &[f64], period: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; data.len()];
    }

    let mut result = vec![f64::NAN; data.len()];
    for (i, window) in data.windows(period).enumerate() {
        result[i + period - 1] = f(window);
    }
    result
}

/// Rolling sum over `period` values.
#[must_use]
pub fn rolling_sum(data: &[f64], period: usize) -> Vec<f64> {
    rolling(data, period, |w| w.iter().sum())
}

/// Simple moving average.
#[must_use]
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    rolling(data, period, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling population standard deviation.
#[must_use]
pub fn rolling_std(data: &[f64], period: usize) -> Vec<f64> {
    rolling(data, period, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    })
}

/// Exponential moving average with multiplier `2 / (period + 1)`.
///
/// Leading NaN values are skipped; the first output is the SMA of the first
/// `period` values after them.
#[must_use]
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    smoothed(data, period, 2.0 / (period as f64 + 1.0))
}

/// Wilder's smoothing (RMA), an EMA with multiplier `1 / period`.
#[must_use]
pub fn wilder(data: &[f64], period: usize) -> Vec<f64> {
    smoothed(data, period, 1.0 / period as f64)
}

fn smoothed(data: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    let mut result = vec![f64::NAN; data.len()];
    if period == 0 {
        return result;
    }

    let Some(start) = data.iter().position(|v| !v.is_nan()) else {
        return result;
    };
    let seed_end = start + period;
    if seed_end > data.len() {
        return result;
    }

    let mut prev = data[start..seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = prev;

    for (i, &value) in data.iter().enumerate().skip(seed_end) {
        prev += (value - prev) * alpha;
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 2.0);
        assert_relative_eq!(result[4], 4.0);
    }

    #[test]
    fn test_sma_period_longer_than_data() {
        assert!(sma(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_sum_propagates_nan() {
        let result = rolling_sum(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 7.0);
    }

    #[test]
    fn test_rolling_std_population() {
        let result = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        assert_relative_eq!(result[7], 2.0);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let result = ema(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 2.0);
        // 2 + (4 - 2) * 0.5
        assert_relative_eq!(result[3], 3.0);
    }

    #[test]
    fn test_ema_skips_leading_nan() {
        let result = ema(&[f64::NAN, f64::NAN, 2.0, 4.0, 6.0], 2);
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 3.0);
        assert_relative_eq!(result[4], 3.0 + (6.0 - 3.0) * (2.0 / 3.0));
    }

    #[test]
    fn test_wilder() {
        let result = wilder(&[1.0, 3.0, 5.0], 2);
        assert_relative_eq!(result[1], 2.0);
        assert_relative_eq!(result[2], 3.5);
    }
}
