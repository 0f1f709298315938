//! The fixed demonstration map.

use terrapath_core::{Grid, Point, Range};

/// Suggested start cell on [`sample_map`].
pub const SAMPLE_START: Point = Point::new(1, 1);
/// Suggested end cell on [`sample_map`].
pub const SAMPLE_END: Point = Point::new(13, 13);

/// Build the 15×15 demonstration map.
///
/// A lake blocks the lower middle, a grass strip crosses it, a mountain
/// range and a sand field sit in the upper half, and a road runs along
/// row 7 and then up column 7. Later regions overwrite earlier ones.
pub fn sample_map() -> Grid {
    let mut grid = Grid::new(15, 15);
    grid.fill("normal");
    grid.fill_range(Range::new(5, 2, 10, 5), "water");
    grid.fill_range(Range::new(3, 7, 7, 12), "mountain");
    grid.fill_range(Range::new(10, 8, 14, 13), "sand");
    grid.fill_range(Range::new(2, 3, 13, 4), "grass");
    grid.fill_range(Range::new(0, 7, 15, 8), "road");
    grid.fill_range(Range::new(7, 8, 8, 15), "road");
    grid
}
