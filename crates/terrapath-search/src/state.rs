use std::cmp::Ordering;

use terrapath_core::Point;

/// Per-cell bookkeeping for one search run.
///
/// Values are only meaningful during or right after a search; every run
/// starts by resetting them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    /// Best known accumulated cost from the start.
    pub g_cost: f64,
    /// Heuristic estimate to the goal. Stays `0` for uniform-cost search.
    pub h_cost: f64,
    /// Predecessor on the best known path.
    pub parent: Option<Point>,
}

impl SearchState {
    #[inline]
    pub fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }

    /// Whether the cell has been reached during the run.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.g_cost.is_finite()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            g_cost: f64::INFINITY,
            h_cost: 0.0,
            parent: None,
        }
    }
}

/// Frontier entry, ordered for use in `BinaryHeap`.
///
/// Smallest `key` pops first; among equal keys the earliest inserted
/// (`seq`) wins.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) key: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}
