//! Shortest-cost path search over terrain grids.
//!
//! Two algorithms share one expansion loop on [`PathFinder`]:
//!
//! - **Uniform-cost search** ([`PathFinder::dijkstra`]), always optimal.
//! - **Heuristic search** ([`PathFinder::a_star`]), guided by straight-line
//!   distance. With the standard catalog the `road` multiplier is below
//!   `1.0`, so this estimate can overshoot and the returned path is not
//!   guaranteed optimal. [`PathFinder::a_star_scaled`] scales the estimate
//!   by the cheapest walkable multiplier and is optimal again.
//!
//! Per-search state lives in the [`PathFinder`], not in the grid, so one
//! grid can be searched by several pathfinders at once.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | uniform-cost search |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic search |
//!
//! [`TerrainPather`] implements all three on top of a
//! [`Grid`](terrapath_core::Grid).

mod astar;
mod dijkstra;
mod distance;
mod pather;
mod pathfinder;
mod state;
mod traits;

pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use pather::{Heuristic, TerrainPather};
pub use pathfinder::{Algorithm, PathFinder, SearchError, SearchResult};
pub use state::SearchState;
pub use traits::{AstarPather, Pather, WeightedPather};
