use tilepath_core::{Bounds, Coord, Grid};

/// Numeric path cost. Unit steps accumulate in it.
pub type Cost = u32;

/// Tentative cost of a cell no path has reached yet.
pub const INFINITE_COST: Cost = Cost::MAX;

/// Minimal pathfinding interface — the graph a search runs over.
pub trait Pather {
    /// Rectangle covering every node. Per-cell search state is sized to it.
    fn bounds(&self) -> Bounds;

    /// Whether a path may start, pass through, or end at `p`.
    fn is_passable(&self, p: Coord) -> bool;

    /// Append the neighbours of `p` into `buf`. The caller clears `buf`
    /// before calling. The append order decides ties between equal-cost
    /// paths, so it must be stable.
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>);
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`.
    fn cost(&self, from: Coord, to: Coord) -> Cost;
}

impl Pather for Grid {
    #[inline]
    fn bounds(&self) -> Bounds {
        Grid::bounds(self)
    }

    #[inline]
    fn is_passable(&self, p: Coord) -> bool {
        self.is_open(p)
    }

    #[inline]
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        self.push_neighbors(p, buf);
    }
}

impl WeightedPather for Grid {
    /// Every floor-to-floor step costs one. Walls never reach this point
    /// because [`Pather::neighbors`] leaves them out.
    #[inline]
    fn cost(&self, _from: Coord, _to: Coord) -> Cost {
        1
    }
}
