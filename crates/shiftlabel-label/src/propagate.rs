//! Backward curve shifting of anomaly labels.

use shiftlabel_types::Label;

/// Extends every anomaly label onto the `shift_hours` bars preceding it.
///
/// `base` holds the direct classification of each bar. For an anomaly at
/// index `i`, bars `max(0, i - shift_hours) .. i` take its label, with two
/// rules:
///
/// - a bar whose own base label is an anomaly keeps it;
/// - a bar inside several windows takes the label of the nearest following
///   anomaly. Equal distances would go to the anomaly visited first in
///   ascending index order, although with backward-only windows two
///   anomalies can never be equidistant from the same bar.
///
/// The result has the same length and order as `base`.
#[must_use]
pub fn propagate(base: &[Label], shift_hours: usize) -> Vec<Label> {
    // (distance to the source anomaly, label) per bar
    let mut overrides: Vec<Option<(usize, Label)>> = vec![None; base.len()];

    for (i, &label) in base.iter().enumerate() {
        if !label.is_anomaly() {
            continue;
        }

        for (j, slot) in overrides
            .iter_mut()
            .enumerate()
            .take(i)
            .skip(i.saturating_sub(shift_hours))
        {
            if base[j].is_anomaly() {
                continue;
            }
            let distance = i - j;
            if slot.is_none_or(|(nearest, _)| distance < nearest) {
                *slot = Some((distance, label));
            }
        }
    }

    base.iter()
        .zip(&overrides)
        .map(|(&own, shifted)| match shifted {
            Some((_, label)) if !own.is_anomaly() => *label,
            _ => own,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: Label = Label::Stable;
    const U: Label = Label::UpwardAnomaly;
    const D: Label = Label::DownwardAnomaly;

    #[test]
    fn test_window_is_clamped_at_start() {
        assert_eq!(propagate(&[S, S, U, S], 4), vec![U, U, U, S]);
    }

    #[test]
    fn test_window_size() {
        let base = [S, S, S, S, S, D, S];
        assert_eq!(propagate(&base, 2), vec![S, S, S, D, D, D, S]);
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let base = [S, U, S, D, S];
        assert_eq!(propagate(&base, 0), base.to_vec());
    }

    #[test]
    fn test_direct_anomaly_not_overwritten() {
        let base = [S, D, S, U];
        assert_eq!(propagate(&base, 3), vec![D, D, U, U]);
    }

    #[test]
    fn test_nearest_following_anomaly_wins() {
        let mut base = vec![S; 14];
        base[10] = U;
        base[12] = D;

        let labels = propagate(&base, 4);

        assert_eq!(labels[5], S);
        assert_eq!(labels[6], U);
        assert_eq!(labels[9], U);
        assert_eq!(labels[10], U);
        assert_eq!(labels[11], D);
        assert_eq!(labels[12], D);
        assert_eq!(labels[13], S);
    }

    #[test]
    fn test_empty() {
        assert!(propagate(&[], 4).is_empty());
    }
}
