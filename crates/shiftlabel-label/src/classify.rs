//! Threshold classification of a forward change.

use shiftlabel_types::Label;

/// Classifies one forward percentage change against `threshold`.
///
/// The comparison is strict: a change of exactly `±threshold` is
/// [`Label::Stable`]. An absent (or NaN) change is also stable.
#[must_use]
pub fn classify(pct_change: Option<f64>, threshold: f64) -> Label {
    match pct_change {
        Some(change) if change > threshold => Label::UpwardAnomaly,
        Some(change) if change < -threshold => Label::DownwardAnomaly,
        _ => Label::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_stable() {
        assert_eq!(classify(Some(1.0), 1.0), Label::Stable);
        assert_eq!(classify(Some(-1.0), 1.0), Label::Stable);
    }

    #[test]
    fn test_strictly_outside_band() {
        assert_eq!(classify(Some(1.000_001), 1.0), Label::UpwardAnomaly);
        assert_eq!(classify(Some(-1.000_001), 1.0), Label::DownwardAnomaly);
        assert_eq!(classify(Some(0.999), 1.0), Label::Stable);
    }

    #[test]
    fn test_absent_change() {
        assert_eq!(classify(None, 1.0), Label::Stable);
        assert_eq!(classify(Some(f64::NAN), 0.0), Label::Stable);
    }

    #[test]
    fn test_zero_threshold() {
        assert_eq!(classify(Some(0.0), 0.0), Label::Stable);
        assert_eq!(classify(Some(1e-9), 0.0), Label::UpwardAnomaly);
        assert_eq!(classify(Some(-1e-9), 0.0), Label::DownwardAnomaly);
    }
}
