use std::fmt;

use tilepath_core::GridError;

/// Something that has to hold before a search or path request makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Both start and goal have been chosen.
    EndpointsSet,
    /// [`PathFinder::run`](crate::PathFinder::run) has completed.
    SearchRun,
    /// The last search settled the goal.
    GoalReached,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointsSet => write!(f, "start and goal must both be set"),
            Self::SearchRun => write!(f, "the search has not been run"),
            Self::GoalReached => write!(f, "the goal is unreachable from the start"),
        }
    }
}

/// Errors surfaced by path searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint or query lies outside the searched grid.
    OutOfBounds(GridError),
    /// The operation was requested too early, or on a failed search.
    PreconditionNotMet(Precondition),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "{e}"),
            Self::PreconditionNotMet(p) => write!(f, "precondition not met: {p}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            Self::PreconditionNotMet(_) => None,
        }
    }
}

impl From<GridError> for PathError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}

impl From<Precondition> for PathError {
    fn from(p: Precondition) -> Self {
        Self::PreconditionNotMet(p)
    }
}
