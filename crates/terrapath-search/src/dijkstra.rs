use terrapath_core::{Grid, Point};

use crate::PathFinder;
use crate::pather::TerrainPather;
use crate::pathfinder::{Algorithm, SearchError, SearchResult};
use crate::traits::WeightedPather;

impl PathFinder {
    /// Uniform-cost search from `start` to `end` on a terrain grid.
    ///
    /// Cells are expanded in order of accumulated cost, so the returned path
    /// is always a cheapest one. Fails fast if either endpoint is outside
    /// the grid or not walkable; an unreachable end gives an empty path.
    pub fn dijkstra(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        avoid_hazard: bool,
    ) -> Result<SearchResult, SearchError> {
        self.prepare(grid, start, end)?;
        self.dijkstra_with(&TerrainPather::new(grid, avoid_hazard), start, end)
    }

    /// Uniform-cost search over an arbitrary weighted pather within this
    /// pathfinder's range.
    pub fn dijkstra_with<P: WeightedPather>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
    ) -> Result<SearchResult, SearchError> {
        let (si, gi) = self.endpoints(start, end)?;
        Ok(self.run(Algorithm::Dijkstra, pather, si, gi, |_| 0.0))
    }
}
