//! Series labeling.

use shiftlabel_types::{Label, LabelConfig, LabeledBar, PriceBar};

use crate::{classify, forward_pct_changes, propagate};

/// Labels a single asset's price series.
#[derive(Debug, Clone, Copy, Default)]
pub struct Labeler {
    config: LabelConfig,
}

impl Labeler {
    /// Creates a labeler with the given configuration.
    #[must_use]
    pub const fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    /// Returns the labeling configuration.
    #[must_use]
    pub const fn config(&self) -> LabelConfig {
        self.config
    }

    /// Direct classification of each bar, before curve shifting.
    #[must_use]
    pub fn base_labels(&self, pct_changes: &[Option<f64>]) -> Vec<Label> {
        pct_changes
            .iter()
            .map(|&change| classify(change, self.config.threshold()))
            .collect()
    }

    /// Labels `bars`, which must be one asset's series in ascending time order.
    ///
    /// The output has one entry per input bar, in the same order.
    #[must_use]
    pub fn label(&self, bars: &[PriceBar]) -> Vec<LabeledBar> {
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let changes = forward_pct_changes(&closes);
        let base = self.base_labels(&changes);
        let labels = propagate(&base, self.config.shift_hours());

        bars.iter()
            .zip(changes)
            .zip(labels)
            .map(|((bar, change), label)| LabeledBar::new(*bar, change, label))
            .collect()
    }
}
