use std::collections::{BinaryHeap, HashSet};
use std::fmt;

use terrapath_core::{Grid, Point, Range};

use crate::state::{Entry, SearchState};
use crate::traits::WeightedPather;

/// Which search produced a [`SearchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => write!(f, "Dijkstra"),
            Self::AStar => write!(f, "A*"),
        }
    }
}

/// Outcome of one search.
///
/// "No path" is a normal outcome: `path` is empty and `cost` is infinite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub algorithm: Algorithm,
    /// Cells from start to end inclusive, or empty if the end is unreachable.
    pub path: Vec<Point>,
    /// Cells closed during the search, in closing order.
    pub closed: Vec<Point>,
    /// Accumulated cost of `path`.
    pub cost: f64,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps along the path (cells - 1), `0` if none was found.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn closed_set(&self) -> HashSet<Point> {
        self.closed.iter().copied().collect()
    }
}

/// Invalid search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    StartOutOfBounds(Point),
    EndOutOfBounds(Point),
    StartUnwalkable(Point),
    EndUnwalkable(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::EndOutOfBounds(p) => write!(f, "end {p} is outside the grid"),
            Self::StartUnwalkable(p) => write!(f, "start {p} is not walkable"),
            Self::EndUnwalkable(p) => write!(f, "end {p} is not walkable"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Runs searches over a grid rectangle.
///
/// `PathFinder` owns the per-cell [`SearchState`] array (addressed by the
/// row-major cell index), the closed flags and the frontier, so repeated
/// queries reuse the same allocations. Every search resets this state
/// before it starts.
#[derive(Debug, Clone)]
pub struct PathFinder {
    pub(crate) rng: Range,
    pub(crate) states: Vec<SearchState>,
    pub(crate) closed: Vec<bool>,
    pub(crate) frontier: BinaryHeap<Entry>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl Default for PathFinder {
    /// An empty pathfinder; the first search sizes it to its grid.
    fn default() -> Self {
        Self::new(Range::default())
    }
}

impl PathFinder {
    /// Create a new `PathFinder` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            states: vec![SearchState::default(); len],
            closed: vec![false; len],
            frontier: BinaryHeap::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Create a `PathFinder` covering `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Replace the underlying range, resizing the state arrays.
    pub fn set_range(&mut self, rng: Range) {
        let len = rng.len();
        self.rng = rng;
        self.states.resize(len, SearchState::default());
        self.closed.resize(len, false);
        self.reset_search_state();
    }

    /// Reset every cell to `g = inf, h = 0, parent = None`, clear the closed
    /// flags and the frontier.
    pub fn reset_search_state(&mut self) {
        self.states.fill(SearchState::default());
        self.closed.fill(false);
        self.frontier.clear();
    }

    /// State left at `p` by the most recent search, or `None` outside the
    /// range.
    pub fn state_at(&self, p: Point) -> Option<&SearchState> {
        self.rng.index_of(p).map(|i| &self.states[i])
    }

    /// Whether `p` was closed by the most recent search.
    pub fn is_closed(&self, p: Point) -> bool {
        self.rng.index_of(p).is_some_and(|i| self.closed[i])
    }

    /// Resize to `grid` if needed and check that both endpoints can be
    /// entered.
    pub(crate) fn prepare(&mut self, grid: &Grid, start: Point, end: Point) -> Result<(), SearchError> {
        if self.rng != grid.bounds() {
            self.set_range(grid.bounds());
        }
        let start_cell = grid
            .get_cell(start)
            .ok_or(SearchError::StartOutOfBounds(start))?;
        let end_cell = grid.get_cell(end).ok_or(SearchError::EndOutOfBounds(end))?;
        if !start_cell.walkable {
            return Err(SearchError::StartUnwalkable(start));
        }
        if !end_cell.walkable {
            return Err(SearchError::EndUnwalkable(end));
        }
        Ok(())
    }

    /// Map both endpoints to cell indices.
    pub(crate) fn endpoints(&self, start: Point, end: Point) -> Result<(usize, usize), SearchError> {
        let si = self
            .rng
            .index_of(start)
            .ok_or(SearchError::StartOutOfBounds(start))?;
        let gi = self
            .rng
            .index_of(end)
            .ok_or(SearchError::EndOutOfBounds(end))?;
        Ok((si, gi))
    }

    /// Shared expansion loop.
    ///
    /// The frontier key of a cell is `g + h`, where `h` comes from
    /// `estimate` (constant `0` for uniform-cost search). Stale frontier
    /// entries are skipped on pop. The run ends when the goal is popped or
    /// the frontier is exhausted.
    pub(crate) fn run<P: WeightedPather>(
        &mut self,
        algorithm: Algorithm,
        pather: &P,
        start_idx: usize,
        goal_idx: usize,
        estimate: impl Fn(Point) -> f64,
    ) -> SearchResult {
        self.reset_search_state();

        let start = self.rng.point_at(start_idx);
        {
            let s = &mut self.states[start_idx];
            s.g_cost = 0.0;
            s.h_cost = estimate(start);
        }

        let mut seq: u64 = 0;
        let mut frontier = std::mem::take(&mut self.frontier);
        frontier.push(Entry {
            key: self.states[start_idx].f_cost(),
            seq,
            idx: start_idx,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut closed_order = Vec::new();

        let found = loop {
            let Some(current) = frontier.pop() else {
                break false;
            };
            let ci = current.idx;

            // Skip stale entries.
            if self.closed[ci] || current.key > self.states[ci].f_cost() {
                log::trace!("skip stale entry for {}", self.rng.point_at(ci));
                continue;
            }

            let cp = self.rng.point_at(ci);
            self.closed[ci] = true;
            closed_order.push(cp);

            if ci == goal_idx {
                break true;
            }

            let current_g = self.states[ci].g_cost;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.rng.index_of(np) else {
                    continue;
                };
                if self.closed[ni] {
                    continue;
                }
                let tentative = current_g + pather.cost(cp, np);
                let n = &mut self.states[ni];
                if tentative >= n.g_cost {
                    continue;
                }
                n.g_cost = tentative;
                n.h_cost = estimate(np);
                n.parent = Some(cp);

                seq += 1;
                frontier.push(Entry {
                    key: n.f_cost(),
                    seq,
                    idx: ni,
                });
            }
        };

        frontier.clear();
        self.frontier = frontier;
        self.nbuf = nbuf;

        let (path, cost) = if found {
            (self.reconstruct(goal_idx), self.states[goal_idx].g_cost)
        } else {
            (Vec::new(), f64::INFINITY)
        };

        log::debug!(
            "{algorithm}: {} -> {}: closed {} cells, path {} cells, cost {:.3}",
            start,
            self.rng.point_at(goal_idx),
            closed_order.len(),
            path.len(),
            cost
        );

        SearchResult {
            algorithm,
            path,
            closed: closed_order,
            cost,
        }
    }

    /// Follow parent links back from the goal.
    fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(self.rng.point_at(goal_idx));
        while let Some(p) = cur {
            path.push(p);
            cur = self.rng.index_of(p).and_then(|i| self.states[i].parent);
        }
        path.reverse();
        path
    }
}
