//! Forward close-to-close percentage change.

/// Computes `(close[t+1] - close[t]) / close[t] * 100` for every bar.
///
/// The last entry is always `None`, as is any entry where either close is
/// absent or `close[t]` is zero.
#[must_use]
pub fn forward_pct_changes(closes: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut changes = Vec::with_capacity(closes.len());

    for pair in closes.windows(2) {
        let change = match (pair[0], pair[1]) {
            (Some(current), Some(next)) if current != 0.0 => {
                Some((next - current) / current * 100.0)
            }
            _ => None,
        };
        changes.push(change);
    }

    if !closes.is_empty() {
        changes.push(None);
    }

    changes
}
