//! Shortest-path search over tile grids.
//!
//! The centrepiece is [`PathFinder`], a single-source Dijkstra search bound
//! to one grid and one pair of endpoints. It owns all per-search state and
//! reconstructs the start-to-goal path once the goal is settled.
//!
//! - **Frontier** selection goes through [`Frontier`], a binary heap that pops
//!   the lowest tentative cost and breaks ties first-in, first-out.
//! - **Unreachable** goals are a normal [`Outcome`], not an error; asking for
//!   the path afterwards fails with [`PathError::PreconditionNotMet`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration, passability |
//! | [`WeightedPather`] : [`Pather`] | [`PathFinder`] |
//!
//! [`tilepath_core::Grid`] implements both with unit step costs.

mod distance;
mod error;
mod frontier;
mod pathfinder;
mod traits;

pub use distance::manhattan;
pub use error::{PathError, Precondition};
pub use frontier::Frontier;
pub use pathfinder::{Outcome, PathFinder, PathNode, SearchConfig, SearchState};
pub use traits::{Cost, INFINITE_COST, Pather, WeightedPather};
