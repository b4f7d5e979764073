use tilepath_core::{Bounds, Coord, GridError};

use crate::error::{PathError, Precondition};
use crate::frontier::Frontier;
use crate::traits::{Cost, INFINITE_COST, WeightedPather};

/// A position with the cost at which it was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Coord,
    pub cost: Cost,
}

/// Search tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Stop as soon as the goal is settled instead of draining the frontier.
    ///
    /// The goal's cost and path are the same either way; only cells the
    /// search never got to are left unsettled.
    pub early_exit: bool,
}

/// Lifecycle of a [`PathFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Bound to its endpoints, not run yet.
    Initialized,
    /// Inside [`PathFinder::run`].
    Running,
    /// The goal was settled.
    Solved,
    /// The frontier drained without settling the goal.
    Unreachable,
}

/// Result of [`PathFinder::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal is reachable at `cost`.
    Solved { cost: Cost },
    /// No sequence of passable cells joins start to goal.
    Unreachable,
}

impl Outcome {
    /// Whether a path exists.
    #[inline]
    pub fn is_solved(self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

/// Single-source Dijkstra search bound to one (pather, start, goal) triple.
///
/// The finder owns all per-cell state (tentative costs, predecessors, the
/// settled set and the frontier) and holds a shared borrow of the pather, so
/// the grid cannot change under a search. Searching other endpoints takes a
/// new finder.
///
/// Endpoints are not validated by [`new`](Self::new): an off-grid or
/// impassable start or goal simply ends in [`Outcome::Unreachable`]. Use
/// [`try_new`](Self::try_new) to reject off-grid endpoints up front.
pub struct PathFinder<'a, P: WeightedPather + ?Sized> {
    pather: &'a P,
    bounds: Bounds,
    start: Coord,
    goal: Coord,
    config: SearchConfig,
    state: SearchState,
    costs: Vec<Cost>,
    preds: Vec<Option<usize>>,
    settled: Vec<bool>,
    order: Vec<PathNode>,
    frontier: Frontier,
    nbuf: Vec<Coord>,
}

impl<'a, P: WeightedPather + ?Sized> PathFinder<'a, P> {
    /// Bind a new search to `pather`, `start` and `goal`.
    pub fn new(pather: &'a P, start: Coord, goal: Coord) -> Self {
        let bounds = pather.bounds();
        let len = bounds.len();
        Self {
            pather,
            bounds,
            start,
            goal,
            config: SearchConfig::default(),
            state: SearchState::Initialized,
            costs: vec![INFINITE_COST; len],
            preds: vec![None; len],
            settled: vec![false; len],
            order: Vec::new(),
            frontier: Frontier::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Like [`new`](Self::new), but fails with [`PathError::OutOfBounds`]
    /// when either endpoint is off the pather's bounds.
    pub fn try_new(pather: &'a P, start: Coord, goal: Coord) -> Result<Self, PathError> {
        let bounds = pather.bounds();
        for p in [start, goal] {
            if !bounds.contains(p) {
                return Err(PathError::OutOfBounds(GridError::OutOfBounds {
                    pos: p,
                    width: bounds.width(),
                    height: bounds.height(),
                }));
            }
        }
        Ok(Self::new(pather, start, goal))
    }

    /// Replace the search configuration (builder).
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Run the search to completion.
    ///
    /// Calling it again recomputes everything from scratch and yields the
    /// same result, since the pather cannot change while borrowed.
    pub fn run(&mut self) -> Outcome {
        self.state = SearchState::Running;
        self.costs.fill(INFINITE_COST);
        self.preds.fill(None);
        self.settled.fill(false);
        self.order.clear();
        self.frontier.clear();

        log::debug!("search {} -> {} over {}", self.start, self.goal, self.bounds);

        // An impassable start seeds nothing, so the frontier is born empty.
        if let Some(si) = self.bounds.index(self.start) {
            if self.pather.is_passable(self.start) {
                self.costs[si] = 0;
                self.frontier.push(si, 0);
            }
        }
        let goal_idx = self.bounds.index(self.goal);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((ci, current_cost)) = self.frontier.pop_min() {
            // Stale entry for a cell already settled at a lower cost.
            if self.settled[ci] {
                continue;
            }
            self.settled[ci] = true;

            let cp = self.bounds.coord(ci);
            self.order.push(PathNode {
                pos: cp,
                cost: current_cost,
            });
            if self.config.early_exit && Some(ci) == goal_idx {
                break;
            }

            nbuf.clear();
            self.pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.bounds.index(np) else {
                    continue;
                };
                if self.settled[ni] {
                    continue;
                }
                let candidate = current_cost.saturating_add(self.pather.cost(cp, np));
                if candidate < self.costs[ni] {
                    self.costs[ni] = candidate;
                    self.preds[ni] = Some(ci);
                    self.frontier.push(ni, candidate);
                }
            }
        }

        self.nbuf = nbuf;

        let outcome = match goal_idx.filter(|&gi| self.settled[gi]) {
            Some(gi) => Outcome::Solved {
                cost: self.costs[gi],
            },
            None => Outcome::Unreachable,
        };
        self.state = match outcome {
            Outcome::Solved { .. } => SearchState::Solved,
            Outcome::Unreachable => SearchState::Unreachable,
        };
        log::debug!(
            "search {} -> {}: {:?}, {} cells settled",
            self.start,
            self.goal,
            outcome,
            self.order.len()
        );
        outcome
    }

    /// The path from start to goal, both included.
    ///
    /// Fails with [`Precondition::SearchRun`] before [`run`](Self::run) and
    /// with [`Precondition::GoalReached`] when the goal was unreachable; a
    /// truncated path is never returned.
    pub fn reconstruct_path(&self) -> Result<Vec<Coord>, PathError> {
        match self.state {
            SearchState::Initialized | SearchState::Running => {
                return Err(Precondition::SearchRun.into());
            }
            SearchState::Unreachable => return Err(Precondition::GoalReached.into()),
            SearchState::Solved => {}
        }
        let (Some(start_idx), Some(goal_idx)) =
            (self.bounds.index(self.start), self.bounds.index(self.goal))
        else {
            return Err(Precondition::GoalReached.into());
        };

        let mut path = Vec::new();
        let mut ci = goal_idx;
        loop {
            path.push(self.bounds.coord(ci));
            if ci == start_idx {
                break;
            }
            // A chain longer than the grid would mean a cycle.
            match self.preds[ci] {
                Some(pi) if path.len() < self.costs.len() => ci = pi,
                _ => return Err(Precondition::GoalReached.into()),
            }
        }
        path.reverse();
        Ok(path)
    }

    /// Tentative cost of `p`: final once `p` is settled, `None` when no path
    /// has reached it or it is off the grid.
    pub fn cost_at(&self, p: Coord) -> Option<Cost> {
        let i = self.bounds.index(p)?;
        let c = self.costs[i];
        (c != INFINITE_COST).then_some(c)
    }

    /// Cell through which the best known path reaches `p`.
    pub fn predecessor_at(&self, p: Coord) -> Option<Coord> {
        let i = self.bounds.index(p)?;
        self.preds[i].map(|pi| self.bounds.coord(pi))
    }

    /// Whether the cost of `p` is final.
    pub fn is_settled(&self, p: Coord) -> bool {
        self.bounds.index(p).is_some_and(|i| self.settled[i])
    }

    /// Every settled cell, in settling order (non-decreasing cost).
    pub fn settled(&self) -> &[PathNode] {
        &self.order
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Coord::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn outcome_round_trip() {
        for o in [Outcome::Solved { cost: 9 }, Outcome::Unreachable] {
            let json = serde_json::to_string(&o).unwrap();
            assert_eq!(serde_json::from_str::<Outcome>(&json).unwrap(), o);
        }
    }

    #[test]
    fn search_config_defaults_missing_fields() {
        let c: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, SearchConfig::default());
    }
}
