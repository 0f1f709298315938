//! A fixed-size grid of terrain cells.
//!
//! [`Grid`] owns one [`Cell`] per position and answers the two queries the
//! search algorithms need: which neighbors can be entered from a cell, and
//! what it costs to step onto one of them. Per-search bookkeeping (costs,
//! parents) is not stored here; it belongs to the pathfinder running the
//! search.

use std::f64::consts::SQRT_2;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::geom::{Point, Range};
use crate::terrain::{TerrainCatalog, TerrainEntry, TerrainId};

/// A grid position with its current terrain.
///
/// Two cells are equal iff their coordinates match.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub terrain: TerrainId,
    pub walkable: bool,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

/// A width × height grid of [`Cell`]s backed by a [`TerrainCatalog`].
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
    catalog: Arc<TerrainCatalog>,
}

impl Grid {
    /// Create a grid using the standard catalog, every cell at its default
    /// terrain. Non-positive dimensions give an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_catalog(width, height, TerrainCatalog::standard())
    }

    /// Create a grid backed by a custom catalog.
    pub fn with_catalog(width: i32, height: i32, catalog: Arc<TerrainCatalog>) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let default = catalog.default_id();
        let walkable = catalog.entry(default).walkable;
        let cells = bounds
            .iter()
            .map(|pos| Cell {
                pos,
                terrain: default,
                walkable,
            })
            .collect();
        Self {
            bounds,
            cells,
            catalog,
        }
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The range of valid coordinates.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    pub fn catalog(&self) -> &TerrainCatalog {
        &self.catalog
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn get_cell(&self, p: Point) -> Option<&Cell> {
        self.bounds.index_of(p).map(|i| &self.cells[i])
    }

    /// Terrain entry of the cell at `p`, or `None` if out of bounds.
    pub fn terrain_at(&self, p: Point) -> Option<&TerrainEntry> {
        self.get_cell(p).map(|c| self.catalog.entry(c.terrain))
    }

    /// Assign terrain by name. Does nothing if `p` is out of bounds.
    ///
    /// Unknown names resolve to the catalog default.
    pub fn set_terrain(&mut self, p: Point, name: &str) {
        let Some(i) = self.bounds.index_of(p) else {
            return;
        };
        let id = match self.catalog.find(name) {
            Some(id) => id,
            None => {
                log::debug!("unknown terrain {name:?} at {p}, using default");
                self.catalog.default_id()
            }
        };
        let cell = &mut self.cells[i];
        cell.terrain = id;
        cell.walkable = self.catalog.entry(id).walkable;
    }

    /// Assign the same terrain to every cell.
    pub fn fill(&mut self, name: &str) {
        self.fill_range(self.bounds, name);
    }

    /// Assign terrain to every cell of `rng` that lies inside the grid.
    pub fn fill_range(&mut self, rng: Range, name: &str) {
        for p in rng.intersect(self.bounds) {
            self.set_terrain(p, name);
        }
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Append the enterable neighbors of `p` into `buf`.
    ///
    /// Candidates are examined in [`DIRECTIONS_8`](crate::geom::DIRECTIONS_8)
    /// order; out-of-bounds and non-walkable ones are dropped. The rest are
    /// split into safe and hazard groups. With `avoid_hazard` set and at
    /// least one safe neighbor, only the safe group is returned; otherwise
    /// the safe group is followed by the hazard group. Points outside the
    /// grid have no neighbors.
    pub fn neighbors_into(&self, p: Point, avoid_hazard: bool, buf: &mut Vec<Point>) {
        if !self.contains(p) {
            return;
        }
        let mut hazards = [Point::ZERO; 8];
        let mut nhazards = 0;
        let start = buf.len();
        for n in p.neighbors_8() {
            let Some(cell) = self.get_cell(n) else {
                continue;
            };
            if !cell.walkable {
                continue;
            }
            if self.catalog.entry(cell.terrain).hazard {
                hazards[nhazards] = n;
                nhazards += 1;
            } else {
                buf.push(n);
            }
        }
        let has_safe = buf.len() > start;
        if avoid_hazard && has_safe {
            return;
        }
        buf.extend_from_slice(&hazards[..nhazards]);
    }

    /// Enterable neighbors of `p`; see [`neighbors_into`](Self::neighbors_into).
    pub fn neighbors(&self, p: Point, avoid_hazard: bool) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors_into(p, avoid_hazard, &mut buf);
        buf
    }

    /// Cost of stepping from `from` onto the adjacent cell `to`.
    ///
    /// The destination's terrain multiplier times `sqrt(2)` for diagonal
    /// moves, `1.0` otherwise. Infinite if `to` is out of bounds.
    pub fn edge_cost(&self, from: Point, to: Point) -> f64 {
        let Some(entry) = self.terrain_at(to) else {
            return f64::INFINITY;
        };
        let step = if from.is_diagonal_to(to) { SQRT_2 } else { 1.0 };
        entry.multiplier * step
    }

    /// Sum of [`edge_cost`](Self::edge_cost) over consecutive cells of `path`.
    pub fn path_cost(&self, path: &[Point]) -> f64 {
        path.windows(2).map(|w| self.edge_cost(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainEntry;

    fn marsh_catalog() -> Arc<TerrainCatalog> {
        Arc::new(
            TerrainCatalog::new(
                vec![
                    TerrainEntry::new("normal", 1.0, true),
                    TerrainEntry::new("marsh", 3.0, true).with_hazard(),
                    TerrainEntry::new("rock", f64::INFINITY, false),
                ],
                "normal",
            )
            .unwrap(),
        )
    }

    #[test]
    fn new_grid_is_normal() {
        let g = Grid::new(4, 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.cells().count(), 12);
        assert!(g.cells().all(|c| c.walkable));
        assert_eq!(g.terrain_at(Point::new(3, 2)).unwrap().name, "normal");
    }

    #[test]
    fn negative_dimensions_give_empty_grid() {
        let g = Grid::new(-2, 5);
        assert_eq!(g.cells().count(), 0);
        assert!(g.get_cell(Point::new(0, 0)).is_none());
    }

    #[test]
    fn get_cell_bounds() {
        let g = Grid::new(3, 3);
        assert_eq!(g.get_cell(Point::new(2, 2)).unwrap().pos, Point::new(2, 2));
        assert!(g.get_cell(Point::new(3, 0)).is_none());
        assert!(g.get_cell(Point::new(0, -1)).is_none());
    }

    #[test]
    fn set_terrain_updates_walkability() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        g.set_terrain(p, "water");
        assert!(!g.get_cell(p).unwrap().walkable);
        g.set_terrain(p, "Sand");
        assert!(g.get_cell(p).unwrap().walkable);
        assert_eq!(g.terrain_at(p).unwrap().multiplier, 1.7);
    }

    #[test]
    fn set_terrain_out_of_range_is_noop() {
        let mut g = Grid::new(2, 2);
        let before: Vec<_> = g.cells().map(|c| c.terrain).collect();
        g.set_terrain(Point::new(5, 5), "water");
        g.set_terrain(Point::new(-1, 0), "water");
        let after: Vec<_> = g.cells().map(|c| c.terrain).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_terrain_behaves_like_normal() {
        let mut g = Grid::new(3, 1);
        g.set_terrain(Point::new(1, 0), "lava");
        g.set_terrain(Point::new(2, 0), "normal");
        let a = g.get_cell(Point::new(1, 0)).unwrap();
        let b = g.get_cell(Point::new(2, 0)).unwrap();
        assert_eq!(a.terrain, b.terrain);
        assert_eq!(a.walkable, b.walkable);
        let from = Point::new(0, 0);
        assert_eq!(g.edge_cost(from, a.pos), g.edge_cost(Point::new(1, 0), b.pos));
    }

    #[test]
    fn cell_equality_is_by_position() {
        let a = Cell {
            pos: Point::new(1, 2),
            terrain: TerrainId(0),
            walkable: true,
        };
        let b = Cell {
            pos: Point::new(1, 2),
            terrain: TerrainId(3),
            walkable: false,
        };
        assert_eq!(a, b);
        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn neighbors_order_and_bounds() {
        let g = Grid::new(3, 3);
        let n = g.neighbors(Point::new(1, 1), true);
        assert_eq!(
            n,
            vec![
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 2),
                Point::new(2, 0),
                Point::new(0, 0),
                Point::new(0, 2),
            ]
        );
        let corner = g.neighbors(Point::new(0, 0), true);
        assert_eq!(
            corner,
            vec![Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn neighbors_skip_unwalkable() {
        let mut g = Grid::new(3, 3);
        g.set_terrain(Point::new(1, 1), "water");
        let n = g.neighbors(Point::new(0, 0), false);
        assert_eq!(n, vec![Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn neighbors_of_outside_point_is_empty() {
        let g = Grid::new(3, 3);
        assert!(g.neighbors(Point::new(i32::MAX, 0), false).is_empty());
        assert!(g.neighbors(Point::new(0, i32::MIN), true).is_empty());
        assert!(g.neighbors(Point::new(-1, 1), false).is_empty());
    }

    #[test]
    fn standard_hazard_fallback_is_empty() {
        // Surrounded by water: hazard is not walkable, so nothing to fall
        // back to.
        let mut g = Grid::new(3, 3);
        g.fill("water");
        g.set_terrain(Point::new(1, 1), "normal");
        assert!(g.neighbors(Point::new(1, 1), true).is_empty());
        assert!(g.neighbors(Point::new(1, 1), false).is_empty());
    }

    #[test]
    fn passable_hazard_is_avoided_when_possible() {
        let mut g = Grid::with_catalog(3, 3, marsh_catalog());
        g.set_terrain(Point::new(1, 2), "marsh");
        g.set_terrain(Point::new(2, 1), "marsh");
        let avoid = g.neighbors(Point::new(1, 1), true);
        assert_eq!(avoid.len(), 6);
        assert!(!avoid.contains(&Point::new(1, 2)));

        let all = g.neighbors(Point::new(1, 1), false);
        assert_eq!(all.len(), 8);
        // Hazard group comes last, in scan order.
        assert_eq!(&all[6..], &[Point::new(1, 2), Point::new(2, 1)]);
    }

    #[test]
    fn passable_hazard_fallback_when_no_safe_neighbor() {
        let mut g = Grid::with_catalog(3, 3, marsh_catalog());
        g.fill("rock");
        g.set_terrain(Point::new(1, 1), "normal");
        g.set_terrain(Point::new(2, 2), "marsh");
        g.set_terrain(Point::new(0, 1), "marsh");
        let n = g.neighbors(Point::new(1, 1), true);
        assert_eq!(n, vec![Point::new(0, 1), Point::new(2, 2)]);
    }

    #[test]
    fn edge_cost_diagonal_factor() {
        let mut g = Grid::new(3, 3);
        let c = Point::new(1, 1);
        assert_eq!(g.edge_cost(c, Point::new(1, 2)), 1.0);
        assert_eq!(g.edge_cost(c, Point::new(0, 1)), 1.0);
        assert!((g.edge_cost(c, Point::new(2, 2)) - SQRT_2).abs() < 1e-12);

        g.set_terrain(Point::new(2, 0), "mountain");
        assert!((g.edge_cost(c, Point::new(2, 0)) - 2.5 * SQRT_2).abs() < 1e-12);
        g.set_terrain(Point::new(1, 0), "road");
        assert!((g.edge_cost(c, Point::new(1, 0)) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn edge_cost_uses_destination_only() {
        let mut g = Grid::new(2, 1);
        g.set_terrain(Point::new(0, 0), "mountain");
        assert_eq!(g.edge_cost(Point::new(0, 0), Point::new(1, 0)), 1.0);
        assert_eq!(g.edge_cost(Point::new(1, 0), Point::new(0, 0)), 2.5);
        assert!(g.edge_cost(Point::new(1, 0), Point::new(2, 0)).is_infinite());
    }

    #[test]
    fn path_cost_sums_edges() {
        let g = Grid::new(3, 3);
        let path = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 1),
            Point::new(2, 2),
        ];
        assert!((g.path_cost(&path) - (2.0 + SQRT_2)).abs() < 1e-12);
        assert_eq!(g.path_cost(&path[..1]), 0.0);
        assert_eq!(g.path_cost(&[]), 0.0);
    }

    #[test]
    fn fill_range_clips_to_grid() {
        let mut g = Grid::new(4, 4);
        g.fill_range(Range::new(2, 2, 10, 10), "grass");
        let grass = g
            .cells()
            .filter(|c| g.catalog().entry(c.terrain).name == "grass")
            .count();
        assert_eq!(grass, 4);
    }
}
