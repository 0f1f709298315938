//! **terrapath-core**: geometry, terrain catalog and weighted grid.
//!
//! This crate provides the static half of terrain-aware pathfinding: cell
//! coordinates, the registry of terrain types with their movement-cost
//! multipliers, and the [`Grid`] that answers neighbor and edge-cost queries.
//! The search algorithms themselves live in `terrapath-search`.

pub mod geom;
pub mod grid;
pub mod terrain;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid};
pub use terrain::{CatalogError, TerrainCatalog, TerrainEntry, TerrainId};
