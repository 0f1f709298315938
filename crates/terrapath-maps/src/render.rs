//! Plain-text rendering of a grid with search overlays.
//!
//! Rows are printed top to bottom from `y = height - 1` down to `y = 0`, so
//! the origin sits in the lower-left corner.

use std::fmt::Write;

use terrapath_core::{Grid, Point, TerrainCatalog};

/// Glyph for a closed cell not on the path.
pub const CLOSED_GLYPH: char = '·';
/// Glyph for a path cell.
pub const PATH_GLYPH: char = '*';
pub const START_GLYPH: char = 'S';
pub const END_GLYPH: char = 'E';

/// What a cell shows once overlays are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Terrain,
    Closed,
    Path,
    Start,
    End,
}

/// Cells drawn over the terrain. Later layers win: closed, then path, then
/// start and end.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOverlay<'a> {
    pub path: &'a [Point],
    pub closed: &'a [Point],
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl<'a> RenderOverlay<'a> {
    /// Overlay with only the two endpoints.
    pub fn endpoints(start: Point, end: Point) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: &'a [Point]) -> Self {
        self.path = path;
        self
    }

    pub fn with_closed(mut self, closed: &'a [Point]) -> Self {
        self.closed = closed;
        self
    }
}

/// Mark for every cell in row-major order (`y` then `x`, from `0`).
pub fn marks(grid: &Grid, overlay: &RenderOverlay) -> Vec<Mark> {
    let bounds = grid.bounds();
    let mut out = vec![Mark::Terrain; bounds.len()];
    let mut set = |p: Point, m: Mark| {
        if let Some(i) = bounds.index_of(p) {
            out[i] = m;
        }
    };
    for &p in overlay.closed {
        set(p, Mark::Closed);
    }
    for &p in overlay.path {
        set(p, Mark::Path);
    }
    if let Some(p) = overlay.start {
        set(p, Mark::Start);
    }
    if let Some(p) = overlay.end {
        set(p, Mark::End);
    }
    out
}

/// Glyph shown for a cell given its mark.
pub fn glyph(grid: &Grid, p: Point, mark: Mark) -> char {
    match mark {
        Mark::Terrain => grid.terrain_at(p).map_or(' ', |t| t.glyph),
        Mark::Closed => CLOSED_GLYPH,
        Mark::Path => PATH_GLYPH,
        Mark::Start => START_GLYPH,
        Mark::End => END_GLYPH,
    }
}

/// Render the grid as text, one line per row, glyphs separated by spaces.
pub fn render(grid: &Grid, overlay: &RenderOverlay) -> String {
    let bounds = grid.bounds();
    let marks = marks(grid, overlay);
    let mut s = String::with_capacity(marks.len() * 2 + bounds.height() as usize);
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            if x > 0 {
                s.push(' ');
            }
            if let Some(i) = bounds.index_of(p) {
                s.push(glyph(grid, p, marks[i]));
            }
        }
        s.push('\n');
    }
    s
}

/// One line per terrain kind followed by the overlay glyphs.
pub fn legend(catalog: &TerrainCatalog) -> String {
    let mut s = String::new();
    for t in catalog.entries() {
        let _ = write!(s, "{} {}", t.glyph, t.name);
        if t.walkable {
            let _ = write!(s, " (x{})", t.multiplier);
        } else {
            s.push_str(" (impassable)");
        }
        if t.hazard {
            s.push_str(" hazard");
        }
        s.push('\n');
    }
    let _ = writeln!(s, "{START_GLYPH} start  {END_GLYPH} end");
    let _ = writeln!(s, "{PATH_GLYPH} path  {CLOSED_GLYPH} closed");
    s
}
