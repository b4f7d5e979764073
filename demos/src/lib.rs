//! Shared rendering model for the terminal demos.
//!
//! Turns a [`Session`] into rows of shaded glyphs; the binaries only decide
//! how a [`Shade`] looks on screen.

use tilepath_core::{Coord, TileKind};
use tilepath_session::Session;

/// Role of a cell in the picture, most specific wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Floor,
    Wall,
    Path,
    Start,
    Goal,
    Selected,
}

impl Shade {
    /// Glyph drawn for this shade.
    pub fn glyph(self) -> char {
        match self {
            Shade::Floor => TileKind::Floor.glyph(),
            Shade::Wall => TileKind::Wall.glyph(),
            Shade::Path => '*',
            Shade::Start => 'S',
            Shade::Goal => 'G',
            Shade::Selected => '+',
        }
    }
}

/// Shade every cell of the session's grid, row by row.
pub fn frame(session: &Session) -> Vec<Vec<Shade>> {
    let grid = session.grid();
    let path = session.path().unwrap_or_default();
    let mut rows = vec![Vec::with_capacity(grid.width() as usize); grid.height() as usize];
    for (p, kind) in grid.iter() {
        let shade = if Some(p) == session.start() {
            Shade::Start
        } else if Some(p) == session.goal() {
            Shade::Goal
        } else if Some(p) == session.selected() {
            Shade::Selected
        } else if path.contains(&p) {
            Shade::Path
        } else if kind.is_traversable() {
            Shade::Floor
        } else {
            Shade::Wall
        };
        rows[p.y as usize].push(shade);
    }
    rows
}

/// Pixel at the centre of a tile, as a pointer would report it.
pub fn tile_center(p: Coord, tile_size: f32) -> (f32, f32) {
    let [x, y] = p.to_pixel(tile_size);
    (x + tile_size / 2.0, y + tile_size / 2.0)
}
