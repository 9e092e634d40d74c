//! Coordinate view of the map: [`Point`] and [`Range`].
//!
//! Tiles are addressed by dense indices ([`TileRef`](crate::TileRef)); these
//! types are only used where geometry matters: distances, rasterisation and
//! search windows.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// Tile coordinates. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 4-connected neighbours in map order: up, right, down, left.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        let Self { x, y } = self;
        [Self::new(x, y - 1), Self::new(x + 1, y), Self::new(x, y + 1), Self::new(x - 1, y)]
    }

    /// 8-connected neighbours, clockwise from up.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        let Self { x, y } = self;
        [
            Self::new(x, y - 1),
            Self::new(x + 1, y - 1),
            Self::new(x + 1, y),
            Self::new(x + 1, y + 1),
            Self::new(x, y + 1),
            Self::new(x - 1, y + 1),
            Self::new(x - 1, y),
            Self::new(x - 1, y - 1),
        ]
    }

    #[inline]
    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Diagonal-move distance: the larger of the two axis gaps.
    #[inline]
    pub fn chebyshev(self, other: Point) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
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

/// Axis-aligned window `[min, max)` over tile coordinates.
///
/// Any two windows without cells are equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => self.min == other.min && self.max == other.max,
            _ => false,
        }
    }
}

impl Eq for Range {}

impl Range {
    /// Window spanned by two corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Tightest window holding every point; empty for no points.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Self {
        points
            .into_iter()
            .fold(None, |acc: Option<(Point, Point)>, p| {
                Some(match acc {
                    None => (p, p),
                    Some((lo, hi)) => (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    ),
                })
            })
            .map_or_else(Self::default, |(lo, hi)| Self {
                min: lo,
                max: hi + Point::new(1, 1),
            })
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Grow by `n` on every side (shrink for negative `n`).
    #[inline]
    pub fn pad(self, n: i32) -> Self {
        let d = Point::new(n, n);
        Self::canonical(self.min - d, self.max + d)
    }

    /// Number of cells.
    #[inline]
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

    /// Overlap of two windows, empty when they are disjoint.
    #[inline]
    pub fn intersect(self, other: Range) -> Self {
        Self::canonical(
            Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        )
    }

    fn canonical(min: Point, max: Point) -> Self {
        let r = Self { min, max };
        if r.is_empty() { Self::default() } else { r }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 2);
        let b = Point::new(4, -2);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a + b, Point::new(5, 0));
        assert_eq!(b - a, Point::new(3, -4));
    }

    #[test]
    fn neighbour_order() {
        let p = Point::new(5, 5);
        assert_eq!(p.neighbors_4()[0], Point::new(5, 4));
        assert_eq!(p.neighbors_4()[3], Point::new(4, 5));
        assert_eq!(p.neighbors_8()[1], Point::new(6, 4));
        assert!(p.neighbors_8().iter().all(|&n| n.chebyshev(p) == 1));
    }

    #[test]
    fn window_cells() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!((r.min, r.max), (Point::new(0, 0), Point::new(3, 2)));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
    }

    #[test]
    fn intersect_clips() {
        assert!(Range::new(0, 0, 2, 2).intersect(Range::new(5, 5, 7, 7)).is_empty());
        assert_eq!(Range::new(0, 0, 4, 4).intersect(Range::new(2, 2, 6, 6)), Range::new(2, 2, 4, 4));
    }

    #[test]
    fn bounding_includes_extremes() {
        let r = Range::bounding([Point::new(2, 5), Point::new(4, 1), Point::new(3, 3)]);
        assert_eq!(r, Range::new(2, 1, 5, 6));
        assert!(r.contains(Point::new(4, 5)));
        assert!(Range::bounding(std::iter::empty()).is_empty());
    }

    #[test]
    fn padding() {
        let r = Range::new(2, 2, 3, 3).pad(1);
        assert_eq!(r, Range::new(1, 1, 4, 4));
        assert_eq!(r.len(), 9);
        assert!(Range::new(0, 0, 2, 2).pad(-1).is_empty());
    }

    #[test]
    fn empty_windows_compare_equal() {
        let b = Range {
            min: Point::new(5, 5),
            max: Point::new(5, 9),
        };
        assert_eq!(Range::default(), b);
        assert_ne!(Range::default(), Range::new(0, 0, 1, 1));
    }
}
