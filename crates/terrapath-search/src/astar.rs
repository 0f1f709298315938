use terrapath_core::{Grid, Point};

use crate::PathFinder;
use crate::pather::{Heuristic, TerrainPather};
use crate::pathfinder::{Algorithm, SearchError, SearchResult};
use crate::traits::AstarPather;

impl PathFinder {
    /// Heuristic search from `start` to `end`, guided by straight-line
    /// distance.
    ///
    /// Usually closes far fewer cells than [`dijkstra`](Self::dijkstra).
    /// Terrain cheaper than `1.0` (such as `road`) makes the estimate
    /// overshoot, in which case the path found may cost more than the
    /// cheapest one. Use [`a_star_scaled`](Self::a_star_scaled) when
    /// optimality matters.
    pub fn a_star(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        avoid_hazard: bool,
    ) -> Result<SearchResult, SearchError> {
        self.a_star_with_heuristic(grid, start, end, avoid_hazard, Heuristic::Euclidean)
    }

    /// Heuristic search with the estimate scaled by the catalog's cheapest
    /// walkable multiplier; always returns a cheapest path.
    pub fn a_star_scaled(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        avoid_hazard: bool,
    ) -> Result<SearchResult, SearchError> {
        self.a_star_with_heuristic(grid, start, end, avoid_hazard, Heuristic::Scaled)
    }

    /// Heuristic search on a terrain grid with an explicit [`Heuristic`].
    pub fn a_star_with_heuristic(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        avoid_hazard: bool,
        heuristic: Heuristic,
    ) -> Result<SearchResult, SearchError> {
        self.prepare(grid, start, end)?;
        let pather = TerrainPather::new(grid, avoid_hazard).with_heuristic(heuristic);
        self.a_star_with(&pather, start, end)
    }

    /// Heuristic search over an arbitrary pather within this pathfinder's
    /// range. `h` is recomputed every time a cell's cost improves.
    pub fn a_star_with<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
    ) -> Result<SearchResult, SearchError> {
        let (si, gi) = self.endpoints(start, end)?;
        Ok(self.run(Algorithm::AStar, pather, si, gi, |p| pather.estimate(p, end)))
    }
}
