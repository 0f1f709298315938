//! Cell coordinates ([`Point`]) and rectangular blocks of cells ([`Range`]).
//!
//! Coordinates are plain integers with `x` growing right and `y` growing up,
//! the same orientation the text renderer uses (row `height - 1` on top).

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// Offsets of the eight surrounding cells, orthogonal moves first.
///
/// Neighbor enumeration always follows this order so that searches are
/// reproducible.
pub const DIRECTIONS_8: [Point; 8] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, -1),
    Point::new(-1, 1),
];

/// Integer cell coordinate on a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours, in [`DIRECTIONS_8`] order.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self + DIRECTIONS_8[0],
            self + DIRECTIONS_8[1],
            self + DIRECTIONS_8[2],
            self + DIRECTIONS_8[3],
        ]
    }

    /// All eight neighbours (orthogonal, then diagonal).
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        DIRECTIONS_8.map(|d| self + d)
    }

    /// Whether moving from `self` to `other` changes both coordinates.
    #[inline]
    pub fn is_diagonal_to(self, other: Point) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Axis-aligned block of cells: `min` is the first cell, `max` is one past
/// the last on both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Block spanned by two opposite corners, given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (xa, xb) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (ya, yb) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point::new(xa, ya),
            max: Point::new(xb, yb),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of cells, `0` for a degenerate block.
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Row-major linear index of `p`, or `None` if `p` is outside.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Inverse of [`index_of`](Self::index_of). The index must be in range.
    #[inline]
    pub fn point_at(self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        Point::new(
            (idx % w) as i32 + self.min.x,
            (idx / w) as i32 + self.min.y,
        )
    }

    /// Cells shared by both blocks; the default (empty) block if none.
    pub fn intersect(self, other: Range) -> Self {
        let lo = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let hi = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        let r = Self { min: lo, max: hi };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Cells in [`index_of`](Self::index_of) order.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    len: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.len {
            return None;
        }
        let p = self.range.point_at(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}
