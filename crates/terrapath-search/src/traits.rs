use terrapath_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0; an infinite
    /// cost makes the move impossible.
    fn cost(&self, from: Point, to: Point) -> f64;
}

/// Pather with a heuristic estimate of the remaining cost.
pub trait AstarPather: WeightedPather {
    /// Estimate of the cost from `from` to `to`.
    ///
    /// Heuristic search is only guaranteed optimal when this never
    /// overestimates the true cost.
    fn estimate(&self, from: Point, to: Point) -> f64;
}
