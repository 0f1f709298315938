use terrapath_core::{Grid, Point};

use crate::distance::euclidean;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Remaining-cost estimate used by heuristic search on a terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Plain straight-line distance. Overestimates whenever a terrain is
    /// cheaper than `1.0`, so the search may return a costlier path.
    #[default]
    Euclidean,
    /// Straight-line distance times the catalog's cheapest walkable
    /// multiplier. Never overestimates.
    Scaled,
}

/// Adapts a [`Grid`] to the pather traits.
///
/// Neighbors follow [`Grid::neighbors_into`] with the given hazard policy;
/// edge costs follow [`Grid::edge_cost`].
#[derive(Debug, Clone, Copy)]
pub struct TerrainPather<'a> {
    grid: &'a Grid,
    avoid_hazard: bool,
    scale: f64,
}

impl<'a> TerrainPather<'a> {
    /// Pather with the default [`Heuristic::Euclidean`] estimate.
    pub fn new(grid: &'a Grid, avoid_hazard: bool) -> Self {
        Self {
            grid,
            avoid_hazard,
            scale: 1.0,
        }
    }

    /// Set the heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.scale = match heuristic {
            Heuristic::Euclidean => 1.0,
            Heuristic::Scaled => self.grid.catalog().min_walkable_multiplier(),
        };
        self
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.grid.neighbors_into(p, self.avoid_hazard, buf);
    }
}

impl WeightedPather for TerrainPather<'_> {
    fn cost(&self, from: Point, to: Point) -> f64 {
        self.grid.edge_cost(from, to)
    }
}

impl AstarPather for TerrainPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to) * self.scale
    }
}
