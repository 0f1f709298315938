//! Random map generation.
//!
//! The border is kept at the default terrain so the map edge is always
//! walkable. Interior cells are drawn from weighted terrain names, then a
//! few road seeds are scattered and grown into their orthogonal neighbors.

use std::fmt;

use rand::{Rng, RngExt};
use terrapath_core::{Grid, Point};

/// Parameters for [`MapGen::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    /// Terrain names with their draw probability.
    ///
    /// Weights are probabilities, not normalized: a uniform draw in
    /// `[0, 1)` picks the first name whose cumulative weight exceeds it.
    /// If the weights sum to less than one, the remainder keeps the
    /// default terrain; weight past `1.0` is never drawn.
    pub terrain_weights: Vec<(String, f64)>,
    /// Number of interior cells turned into road after the draw.
    pub road_seeds: usize,
    /// Chance that each orthogonal neighbor of a road seed also becomes road.
    pub road_spread: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            terrain_weights: [
                ("normal", 0.5),
                ("grass", 0.2),
                ("sand", 0.15),
                ("water", 0.1),
                ("mountain", 0.05),
                ("road", 0.1),
            ]
            .into_iter()
            .map(|(n, w)| (n.to_string(), w))
            .collect(),
            road_seeds: 10,
            road_spread: 0.3,
        }
    }
}

impl MapConfig {
    /// Default configuration with the given size.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check dimensions and weights.
    pub fn validate(&self) -> Result<(), MapConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        for (name, w) in &self.terrain_weights {
            if !w.is_finite() || *w < 0.0 {
                return Err(MapConfigError::InvalidWeight {
                    name: name.clone(),
                    weight: *w,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.road_spread) {
            return Err(MapConfigError::InvalidSpread(self.road_spread));
        }
        Ok(())
    }
}

/// Errors reported by [`MapConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapConfigError {
    /// Width or height is not positive.
    EmptyGrid { width: i32, height: i32 },
    /// A terrain weight is negative, infinite or NaN.
    InvalidWeight { name: String, weight: f64 },
    /// Road spread is not a probability.
    InvalidSpread(f64),
}

impl fmt::Display for MapConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "map config: grid size {width}x{height} has no cells")
            }
            Self::InvalidWeight { name, weight } => {
                write!(f, "map config: terrain \u{201c}{name}\u{201d} has invalid weight {weight}")
            }
            Self::InvalidSpread(p) => write!(f, "map config: road spread {p} is not in [0, 1]"),
        }
    }
}

impl std::error::Error for MapConfigError {}

/// Random map generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    /// Upper bound on tries in [`random_endpoints`](Self::random_endpoints).
    pub const ENDPOINT_ATTEMPTS: usize = 10_000;

    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Default configuration with a random size of 10 to 20 cells per side.
    pub fn random_config(&mut self) -> MapConfig {
        let width = self.rng.random_range(10..=20);
        let height = self.rng.random_range(10..=20);
        MapConfig::with_size(width, height)
    }

    /// Generate a map on the standard terrain catalog.
    pub fn generate(&mut self, config: &MapConfig) -> Result<Grid, MapConfigError> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height);
        let (w, h) = (config.width, config.height);

        for p in grid.bounds() {
            if p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1 {
                grid.set_terrain(p, "normal");
                continue;
            }
            let r: f64 = self.rng.random();
            let mut cumulative = 0.0;
            for (name, weight) in &config.terrain_weights {
                cumulative += weight;
                if r < cumulative {
                    grid.set_terrain(p, name);
                    break;
                }
            }
        }

        if w < 3 || h < 3 {
            if config.road_seeds > 0 {
                log::warn!("map {w}x{h} has no interior, skipping road seeds");
            }
            return Ok(grid);
        }

        for _ in 0..config.road_seeds {
            let seed = Point::new(self.rng.random_range(1..w - 1), self.rng.random_range(1..h - 1));
            grid.set_terrain(seed, "road");
            for n in seed.neighbors_4() {
                if grid.contains(n) && self.rng.random::<f64>() < config.road_spread {
                    grid.set_terrain(n, "road");
                }
            }
        }

        log::debug!(
            "generated {w}x{h} map, {} walkable cells",
            grid.cells().filter(|c| c.walkable).count()
        );
        Ok(grid)
    }

    /// Pick two distinct walkable cells.
    ///
    /// Returns `None` if no pair was found within
    /// [`ENDPOINT_ATTEMPTS`](Self::ENDPOINT_ATTEMPTS) tries.
    pub fn random_endpoints(&mut self, grid: &Grid) -> Option<(Point, Point)> {
        if grid.bounds().is_empty() {
            return None;
        }
        let (w, h) = (grid.width(), grid.height());
        for _ in 0..Self::ENDPOINT_ATTEMPTS {
            let a = Point::new(self.rng.random_range(0..w), self.rng.random_range(0..h));
            let b = Point::new(self.rng.random_range(0..w), self.rng.random_range(0..h));
            let walkable = |p| grid.get_cell(p).is_some_and(|c| c.walkable);
            if a != b && walkable(a) && walkable(b) {
                return Some((a, b));
            }
        }
        log::warn!("no walkable endpoint pair found on {w}x{h} map");
        None
    }
}
