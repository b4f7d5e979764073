//! The [`TileKind`] type — per-cell classification.

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Open ground. Every step onto a floor tile costs one.
    #[default]
    Floor,
    /// Blocked. Never part of a path.
    Wall,
}

impl TileKind {
    /// Whether a path may step onto this tile.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, TileKind::Floor)
    }

    /// ASCII glyph: `.` for floor, `#` for wall.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    #[inline]
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(TileKind::Floor),
            '#' => Some(TileKind::Wall),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_floor_is_traversable() {
        assert!(TileKind::Floor.is_traversable());
        assert!(!TileKind::Wall.is_traversable());
        assert_eq!(TileKind::default(), TileKind::Floor);
    }

    #[test]
    fn glyphs() {
        assert_eq!(TileKind::from_glyph('#'), Some(TileKind::Wall));
        assert_eq!(TileKind::from_glyph(TileKind::Floor.glyph()), Some(TileKind::Floor));
        assert_eq!(TileKind::from_glyph('x'), None);
    }
}
