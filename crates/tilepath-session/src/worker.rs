//! Run-to-completion searches, inline or on a worker thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tilepath_core::{Coord, Grid};
use tilepath_paths::{Outcome, PathError, PathFinder, SearchConfig};

/// Everything a finished search hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub start: Coord,
    pub goal: Coord,
    /// Caller-chosen tag naming the grid the search ran on, echoed back
    /// unchanged so results can be matched to that grid later.
    pub generation: u64,
    pub outcome: Outcome,
    /// Start-to-goal path when solved.
    pub path: Option<Vec<Coord>>,
    /// Number of cells the search settled.
    pub settled: usize,
}

/// Run one search on `grid` and collect its report, tagged with `generation`.
pub fn search(
    grid: &Grid,
    generation: u64,
    start: Coord,
    goal: Coord,
    config: SearchConfig,
) -> Result<SearchReport, PathError> {
    let mut pf = PathFinder::new(grid, start, goal).with_config(config);
    let outcome = pf.run();
    let path = match outcome {
        Outcome::Solved { .. } => Some(pf.reconstruct_path()?),
        Outcome::Unreachable => None,
    };
    Ok(SearchReport {
        start,
        goal,
        generation,
        outcome,
        path,
        settled: pf.settled().len(),
    })
}

/// A search running on its own thread.
pub struct SearchHandle {
    handle: JoinHandle<Result<SearchReport, PathError>>,
}

impl SearchHandle {
    /// Whether the worker has finished, so [`join`](Self::join) won't block.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the finished report.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the worker thread.
    pub fn join(self) -> Result<SearchReport, PathError> {
        match self.handle.join() {
            Ok(report) => report,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

/// Start a search on a new thread. The grid is shared read-only, so any
/// number of searches may run over it at once.
pub fn spawn_search(
    grid: Arc<Grid>,
    generation: u64,
    start: Coord,
    goal: Coord,
    config: SearchConfig,
) -> SearchHandle {
    log::debug!("spawning search {start} -> {goal} (grid generation {generation})");
    let handle = thread::spawn(move || search(&grid, generation, start, goal, config));
    SearchHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn inline_report() {
        let g = Grid::from_ascii("...\n.#.\n...").unwrap();
        let r = search(&g, 0, Coord::new(0, 0), Coord::new(2, 2), SearchConfig::default()).unwrap();
        assert_eq!(r.outcome, Outcome::Solved { cost: 4 });
        assert_eq!(r.path.as_ref().map(Vec::len), Some(5));
        assert_eq!(r.settled, 8);
    }

    #[test]
    fn unreachable_report_has_no_path() {
        let g = Grid::from_ascii(".#.").unwrap();
        let r = search(&g, 0, Coord::new(0, 0), Coord::new(2, 0), SearchConfig::default()).unwrap();
        assert_eq!(r.outcome, Outcome::Unreachable);
        assert_eq!(r.path, None);
    }

    #[test]
    fn workers_agree_with_inline_search() {
        let mut g = Grid::new(24, 16).unwrap();
        g.generate_random(0.25, &mut StdRng::seed_from_u64(99));
        let grid = Arc::new(g);
        let start = Coord::new(3, 3);
        let goals = [Coord::new(20, 12), Coord::new(0, 15), Coord::new(23, 0)];

        let handles: Vec<_> = goals
            .iter()
            .map(|&t| spawn_search(Arc::clone(&grid), 3, start, t, SearchConfig::default()))
            .collect();
        for (handle, &t) in handles.into_iter().zip(goals.iter()) {
            let report = handle.join().unwrap();
            let expected = search(&grid, 3, start, t, SearchConfig::default()).unwrap();
            assert_eq!(report, expected);
        }
    }
}
