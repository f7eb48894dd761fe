//! Weighted choice over resource kinds.
//!
//! The table is a cumulative distribution over `(kind, weight)` pairs in
//! enumeration order. A roll in `[0, total)` selects the first kind whose
//! cumulative weight reaches the roll, so ties resolve toward the earlier
//! kind. Zero-weight kinds are left out and can never be drawn.

use crate::game::ResourceKind;

/// Cumulative distribution for a single weighted draw.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable {
    /// `(kind, cumulative weight)`, strictly increasing in weight.
    cumulative: Vec<(ResourceKind, f64)>,
}

impl WeightedTable {
    /// Build a table from `(kind, weight)` pairs.
    ///
    /// Pairs are sorted into enumeration order; non-positive and non-finite
    /// weights are skipped.
    #[must_use]
    pub fn new(weights: impl IntoIterator<Item = (ResourceKind, f64)>) -> Self {
        let mut entries: Vec<_> = weights
            .into_iter()
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .collect();
        entries.sort_by_key(|(kind, _)| *kind);

        let mut running = 0.0;
        let cumulative = entries
            .into_iter()
            .map(|(kind, weight)| {
                running += weight;
                (kind, running)
            })
            .collect();

        Self { cumulative }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cumulative.last().map_or(0.0, |(_, c)| *c)
    }

    /// True if nothing can be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Select the kind for `roll`, where `roll` is in `[0, total]`.
    ///
    /// Rolls above the total clamp to the last kind.
    #[must_use]
    pub fn pick(&self, roll: f64) -> Option<ResourceKind> {
        let idx = self.cumulative.partition_point(|(_, c)| *c < roll);
        self.cumulative
            .get(idx)
            .or_else(|| self.cumulative.last())
            .map(|(kind, _)| *kind)
    }

    /// Probability of drawing each kind, in enumeration order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<(ResourceKind, f64)> {
        let total = self.total();
        let mut previous = 0.0;
        self.cumulative
            .iter()
            .map(|&(kind, c)| {
                let p = (c - previous) / total;
                previous = c;
                (kind, p)
            })
            .collect()
    }
}
