//! The [`Grid`] type — a dense 2D buffer of [`TileKind`]s.
//!
//! A `Grid` owns its tiles outright. It holds no interior mutability, so a
//! shared `&Grid` is frozen for as long as the borrow lives and can be read
//! from several threads at once.

use std::fmt;

use rand::Rng;

use crate::error::GridError;
use crate::geom::{Bounds, Coord, KEY_HALF_SPAN};
use crate::tile::TileKind;

/// A rectangular tile grid with binary traversability.
///
/// Cells are addressed by `(x, y)` with `0 <= x < width` and
/// `0 <= y < height`. Every query outside that rectangle fails with
/// [`GridError::OutOfBounds`]; nothing is clamped or wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    tiles: Vec<TileKind>,
    bounds: Bounds,
}

impl Grid {
    /// Largest accepted width or height. Every in-bounds coordinate then
    /// has a distinct [`Coord::key`].
    pub const MAX_SIDE: i32 = KEY_HALF_SPAN as i32;

    /// Create a new all-floor grid of the given dimensions.
    ///
    /// Both sides must lie in `1..=Grid::MAX_SIDE`.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if !(1..=Self::MAX_SIDE).contains(&width) || !(1..=Self::MAX_SIDE).contains(&height) {
            return Err(GridError::InvalidSize { width, height });
        }
        let bounds = Bounds::sized(width, height);
        Ok(Self {
            tiles: vec![TileKind::Floor; bounds.len()],
            bounds,
        })
    }

    /// Parse a grid from ASCII art: `.` is floor, `#` is wall.
    ///
    /// Blank lines and surrounding whitespace on each line are ignored, so
    /// indented string literals work. All rows must have the same width.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count() as i32);
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let y = y as i32;
            let found = row.chars().count() as i32;
            if found != width {
                return Err(GridError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Coord::new(x as i32, y);
                let kind = TileKind::from_glyph(ch).ok_or(GridError::InvalidTile { ch, pos })?;
                grid.set(pos, kind)?;
            }
        }
        Ok(grid)
    }

    /// The bounding rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Coord) -> Result<usize, GridError> {
        self.bounds.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Tile kind at `(x, y)`.
    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> Result<TileKind, GridError> {
        self.at(Coord::new(x, y))
    }

    /// Tile kind at `p`.
    #[inline]
    pub fn at(&self, p: Coord) -> Result<TileKind, GridError> {
        let i = self.index(p)?;
        Ok(self.tiles[i])
    }

    /// Set the tile kind at `(x, y)`.
    #[inline]
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) -> Result<(), GridError> {
        self.set(Coord::new(x, y), kind)
    }

    /// Set the tile kind at `p`.
    #[inline]
    pub fn set(&mut self, p: Coord, kind: TileKind) -> Result<(), GridError> {
        let i = self.index(p)?;
        self.tiles[i] = kind;
        Ok(())
    }

    /// Whether the tile at `(x, y)` is floor.
    #[inline]
    pub fn is_traversable(&self, x: i32, y: i32) -> Result<bool, GridError> {
        Ok(self.tile_at(x, y)?.is_traversable())
    }

    /// Whether `p` is on the grid and floor. Never fails.
    #[inline]
    pub fn is_open(&self, p: Coord) -> bool {
        self.bounds
            .index(p)
            .is_some_and(|i| self.tiles[i].is_traversable())
    }

    /// In-bounds, traversable axis-aligned neighbours of `(x, y)`, in
    /// north, south, west, east order.
    ///
    /// The origin itself is only bounds-checked: a wall origin still
    /// reports its open neighbours.
    pub fn neighbors(&self, x: i32, y: i32) -> Result<Vec<Coord>, GridError> {
        let origin = Coord::new(x, y);
        self.index(origin)?;
        let mut out = Vec::with_capacity(4);
        self.push_neighbors(origin, &mut out);
        Ok(out)
    }

    /// Append the open neighbours of `p` to `buf` without allocating.
    ///
    /// Out-of-bounds origins yield whatever neighbours happen to be on the
    /// grid; callers wanting the strict contract use [`neighbors`](Self::neighbors).
    pub fn push_neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        for n in p.neighbors_4() {
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }

    /// Every `(cell, neighbour)` link between two open cells, for debug
    /// overlays. Each undirected link appears twice, once per direction.
    pub fn neighbor_links(&self) -> Vec<(Coord, Coord)> {
        let mut links = Vec::new();
        let mut buf = Vec::with_capacity(4);
        for p in self.bounds.iter().filter(|&p| self.is_open(p)) {
            buf.clear();
            self.push_neighbors(p, &mut buf);
            links.extend(buf.iter().map(|&n| (p, n)));
        }
        links
    }

    /// Fill the whole grid with `kind`.
    pub fn fill(&mut self, kind: TileKind) {
        self.tiles.fill(kind);
    }

    /// Make each cell a wall with probability `wall_probability`, floor
    /// otherwise.
    ///
    /// Cells are visited in row-major order, drawing one `f64` each, so a
    /// seeded `rng` always produces the same grid. The probability is
    /// clamped to `[0, 1]`; NaN counts as `0`.
    pub fn generate_random<R: Rng>(&mut self, wall_probability: f64, rng: &mut R) {
        let p = if wall_probability.is_nan() {
            log::warn!("wall probability is NaN, generating no walls");
            0.0
        } else {
            wall_probability.clamp(0.0, 1.0)
        };
        for tile in self.tiles.iter_mut() {
            let r: f64 = rng.random();
            *tile = if r < p { TileKind::Wall } else { TileKind::Floor };
        }
        log::debug!(
            "generated {}x{} grid, {} walls (p={p})",
            self.width(),
            self.height(),
            self.count(TileKind::Wall)
        );
    }

    /// Count how many cells are of the given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Iterate over `(Coord, TileKind)` pairs in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Coord, TileKind)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl fmt::Display for Grid {
    /// One line per row, `.` for floor and `#` for wall.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width() as usize;
        for (i, row) in self.tiles.chunks(w).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for t in row {
                write!(f, "{}", t.glyph())?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

/// Rows of ASCII glyphs; deserialization re-validates through
/// [`Grid::from_ascii`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    rows: Vec<String>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            rows: g.to_string().lines().map(str::to_owned).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        Grid::from_ascii(&r.rows.join("\n"))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_ascii("#.\n..\n.#").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r##"{"rows":["#.","..",".#"]}"##);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn grid_rejects_bad_rows() {
        let bad = r#"{"rows":["..","."]}"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());
    }
}
