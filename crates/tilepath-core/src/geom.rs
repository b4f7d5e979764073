//! Geometry primitives: [`Coord`] and [`Bounds`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// Half the side of the square over which [`Coord::key`] is collision free.
///
/// This is `floor(sqrt(i32::MAX))`, so the full key space fits in an `i64`
/// with plenty of room to spare.
pub const KEY_HALF_SPAN: i64 = 46_340;

/// A 2D integer grid coordinate. X grows right (east), Y grows down (south).
///
/// The type enforces no range: whether a coordinate lies on a grid is the
/// grid's business.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a coordinate shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Affine hash key `(y + H) * 2H + (x + H)` with `H = KEY_HALF_SPAN`.
    ///
    /// Distinct coordinates with `|x| < H` and `|y| < H` always get distinct
    /// keys. Outside that square keys may collide, which only costs hash
    /// quality, never correctness.
    #[inline]
    pub const fn key(self) -> i64 {
        let span = KEY_HALF_SPAN * 2;
        (self.y as i64 + KEY_HALF_SPAN) * span + (self.x as i64 + KEY_HALF_SPAN)
    }

    /// The four axis-aligned neighbours in north, south, west, east order.
    ///
    /// Path tie-breaking depends on this order.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
        ]
    }

    /// Whether `other` is one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// The coordinate as a float vector, for renderers.
    #[inline]
    pub fn to_vec2(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }

    /// Top-left pixel of this tile for a square tile of side `tile_size`.
    #[inline]
    pub fn to_pixel(self, tile_size: f32) -> [f32; 2] {
        [self.x as f32 * tile_size, self.y as f32 * tile_size]
    }

    /// Map a pixel position to the tile under it: `floor(pixel / tile_size)`.
    ///
    /// Negative pixels map to negative tiles; the result is not clamped.
    #[inline]
    pub fn from_pixel(px: f32, py: f32, tile_size: f32) -> Self {
        Self::new(
            (px / tile_size).floor() as i32,
            (py / tile_size).floor() as i32,
        )
    }
}

// --- trait impls for Coord ---

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.key());
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Coord {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for Coord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Coord {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
///
/// Besides containment it maps coordinates to flat row-major indices, which
/// is how dense per-cell arrays (tiles, costs, predecessors) are addressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    /// Create bounds from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Coord::new(x0.min(x1), y0.min(y1)),
            max: Coord::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Bounds `[0, width) × [0, height)`.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open rectangle.
    #[inline]
    pub fn contains(self, p: Coord) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major flat index of `p`, or `None` when `p` is outside.
    #[inline]
    pub fn index(self, p: Coord) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Inverse of [`index`](Self::index). `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let w = self.width() as usize;
        Coord::new(
            (idx % w) as i32 + self.min.x,
            (idx / w) as i32 + self.min.y,
        )
    }

    /// Row-major iterator over every coordinate inside.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Coord;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Coord,
}

impl Iterator for BoundsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.cur.y >= self.bounds.max.y || self.bounds.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return (0, Some(0));
        }
        let w = self.bounds.width() as usize;
        let remaining_in_row = (self.bounds.max.x - self.cur.x) as usize;
        let remaining_rows = (self.bounds.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}
