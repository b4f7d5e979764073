//! **tilepath-core** — tile grid primitives for shortest-path search.
//!
//! This crate provides the value types shared across the *tilepath*
//! workspace: integer grid coordinates, a half-open bounds rectangle, tile
//! kinds, and the [`Grid`] that owns the tile buffer and answers
//! traversability and adjacency queries.

pub mod error;
pub mod geom;
pub mod grid;
pub mod tile;

pub use error::GridError;
pub use geom::{Bounds, BoundsIter, Coord};
pub use grid::Grid;
pub use tile::TileKind;
