//! The [`Session`] controller.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilepath_core::{Coord, Grid, GridError};
use tilepath_paths::{Outcome, PathError, Precondition};

use crate::config::SessionConfig;
use crate::worker::{self, SearchHandle, SearchReport};

/// Input the session understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer click at a pixel position.
    Click { x: f32, y: f32 },
    /// Search from start to goal.
    RunSearch,
    /// Forget start, goal, selection and path.
    Reset,
    /// Re-roll the grid, then reset.
    Regenerate,
}

/// What an [`Event`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    StartSet(Coord),
    GoalSet(Coord),
    /// Both endpoints were already chosen; the tile is only highlighted.
    Selected(Coord),
    /// The click missed the grid or landed on a wall.
    Ignored,
    Searched(Outcome),
    /// The request could not be served; carries the diagnostic.
    Rejected(PathError),
    Cleared,
    Regenerated,
}

/// Owns a grid and the user's endpoint choices, and runs searches on demand.
///
/// Start and goal are each accepted once; further clicks only move the
/// selection until [`reset`](Self::reset). A fresh
/// [`PathFinder`](tilepath_paths::PathFinder) is built for every search.
pub struct Session {
    config: SessionConfig,
    grid: Arc<Grid>,
    /// Bumped whenever the grid's tiles change.
    generation: u64,
    rng: StdRng,
    start: Option<Coord>,
    goal: Option<Coord>,
    selected: Option<Coord>,
    outcome: Option<Outcome>,
    path: Option<Vec<Coord>>,
}

impl Session {
    /// Build a session with a freshly randomized grid.
    pub fn new(config: SessionConfig) -> Result<Self, GridError> {
        let mut grid = Grid::new(config.width, config.height)?;
        let mut rng = seeded_rng(config.seed);
        grid.generate_random(config.wall_probability, &mut rng);
        Ok(Self::from_parts(config, grid, rng))
    }

    /// Build a session around an existing grid. `config.width` and
    /// `config.height` are replaced by the grid's own size.
    pub fn with_grid(grid: Grid, config: SessionConfig) -> Self {
        let rng = seeded_rng(config.seed);
        Self::from_parts(config, grid, rng)
    }

    fn from_parts(mut config: SessionConfig, grid: Grid, rng: StdRng) -> Self {
        config.width = grid.width();
        config.height = grid.height();
        Self {
            config,
            grid: Arc::new(grid),
            generation: 0,
            rng,
            start: None,
            goal: None,
            selected: None,
            outcome: None,
            path: None,
        }
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: Event) -> Response {
        match event {
            Event::Click { x, y } => self.click(x, y),
            Event::RunSearch => match self.run_search() {
                Ok(outcome) => Response::Searched(outcome),
                Err(e) => Response::Rejected(e),
            },
            Event::Reset => {
                self.reset();
                Response::Cleared
            }
            Event::Regenerate => {
                self.regenerate();
                Response::Regenerated
            }
        }
    }

    /// Handle a click at pixel `(x, y)`.
    ///
    /// The first click on an open tile sets the start, the second the goal,
    /// later ones the selection. Clicks off the grid or on walls are ignored.
    pub fn click(&mut self, x: f32, y: f32) -> Response {
        let tile = Coord::from_pixel(x, y, self.config.tile_size);
        if !self.grid.is_open(tile) {
            log::debug!("ignoring click at ({x}, {y}): tile {tile} is not open floor");
            return Response::Ignored;
        }
        if self.start.is_none() {
            self.start = Some(tile);
            Response::StartSet(tile)
        } else if self.goal.is_none() {
            self.goal = Some(tile);
            Response::GoalSet(tile)
        } else {
            self.selected = Some(tile);
            Response::Selected(tile)
        }
    }

    /// Set the start unless one is already set. Returns whether it was taken.
    ///
    /// Off-grid coordinates are an error; walls are refused.
    pub fn set_start(&mut self, p: Coord) -> Result<bool, PathError> {
        let accepted = self.endpoint_allowed(p, self.start)?;
        if accepted {
            self.start = Some(p);
        }
        Ok(accepted)
    }

    /// Set the goal unless one is already set. Returns whether it was taken.
    pub fn set_goal(&mut self, p: Coord) -> Result<bool, PathError> {
        let accepted = self.endpoint_allowed(p, self.goal)?;
        if accepted {
            self.goal = Some(p);
        }
        Ok(accepted)
    }

    fn endpoint_allowed(&self, p: Coord, current: Option<Coord>) -> Result<bool, PathError> {
        if !self.grid.at(p)?.is_traversable() {
            log::debug!("refusing endpoint {p}: wall");
            return Ok(false);
        }
        if let Some(c) = current {
            log::debug!("refusing endpoint {p}: already set to {c}");
            return Ok(false);
        }
        Ok(true)
    }

    fn endpoints(&self) -> Result<(Coord, Coord), PathError> {
        match (self.start, self.goal) {
            (Some(s), Some(g)) => Ok((s, g)),
            _ => {
                let p = Precondition::EndpointsSet;
                log::warn!("cannot search: {p}");
                Err(PathError::PreconditionNotMet(p))
            }
        }
    }

    /// Search from start to goal and keep the path on success.
    ///
    /// Fails with [`Precondition::EndpointsSet`] unless both are set.
    pub fn run_search(&mut self) -> Result<Outcome, PathError> {
        let (start, goal) = self.endpoints()?;
        let report = worker::search(&self.grid, self.generation, start, goal, self.config.search)?;
        let outcome = report.outcome;
        self.store(report);
        Ok(outcome)
    }

    /// Like [`run_search`](Self::run_search) but on a worker thread. Feed
    /// the finished report back through [`apply_report`](Self::apply_report).
    pub fn spawn_search(&self) -> Result<SearchHandle, PathError> {
        let (start, goal) = self.endpoints()?;
        Ok(worker::spawn_search(
            Arc::clone(&self.grid),
            self.generation,
            start,
            goal,
            self.config.search,
        ))
    }

    /// Accept a worker's report if it ran on the current grid and still
    /// matches the current endpoints. Returns whether it was applied.
    pub fn apply_report(&mut self, report: SearchReport) -> bool {
        if report.generation != self.generation {
            log::debug!(
                "discarding report {} -> {} from grid generation {} (now {})",
                report.start,
                report.goal,
                report.generation,
                self.generation
            );
            return false;
        }
        if self.start != Some(report.start) || self.goal != Some(report.goal) {
            log::debug!(
                "discarding stale report {} -> {}",
                report.start,
                report.goal
            );
            return false;
        }
        self.store(report);
        true
    }

    fn store(&mut self, report: SearchReport) {
        match report.outcome {
            Outcome::Solved { cost } => {
                log::info!("path {} -> {} costs {cost}", report.start, report.goal)
            }
            Outcome::Unreachable => {
                log::info!("{} is unreachable from {}", report.goal, report.start)
            }
        }
        self.outcome = Some(report.outcome);
        self.path = report.path;
    }

    /// Forget start, goal, selection and the last result.
    pub fn reset(&mut self) {
        self.start = None;
        self.goal = None;
        self.selected = None;
        self.outcome = None;
        self.path = None;
    }

    /// Re-roll every tile and reset.
    ///
    /// Grids already handed to running workers are left untouched.
    pub fn regenerate(&mut self) {
        let p = self.config.wall_probability;
        Arc::make_mut(&mut self.grid).generate_random(p, &mut self.rng);
        self.generation = self.generation.wrapping_add(1);
        self.reset();
    }

    // -----------------------------------------------------------------------
    // Render view
    // -----------------------------------------------------------------------

    /// Counter identifying the current grid; changes on every regenerate.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.config.tile_size
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Outcome of the last search since the last reset.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Path of the last successful search.
    #[inline]
    pub fn path(&self) -> Option<&[Coord]> {
        self.path.as_deref()
    }

    /// Links between adjacent open cells, for debug overlays.
    pub fn neighbor_links(&self) -> Vec<(Coord, Coord)> {
        self.grid.neighbor_links()
    }
}

/// A seeded generator, or one drawn from the OS when `seed` is `None`.
fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::TileKind;

    const MAP: &str = "\
        ....
        .##.
        ....";

    fn session() -> Session {
        let config = SessionConfig {
            tile_size: 10.0,
            ..SessionConfig::default()
        };
        Session::with_grid(Grid::from_ascii(MAP).unwrap(), config)
    }

    #[test]
    fn clicks_set_start_goal_then_select() {
        let mut s = session();
        assert_eq!(s.click(5.0, 5.0), Response::StartSet(Coord::new(0, 0)));
        assert_eq!(s.click(39.0, 21.0), Response::GoalSet(Coord::new(3, 2)));
        assert_eq!(s.click(15.0, 0.0), Response::Selected(Coord::new(1, 0)));
        assert_eq!(s.start(), Some(Coord::new(0, 0)));
        assert_eq!(s.goal(), Some(Coord::new(3, 2)));
        assert_eq!(s.selected(), Some(Coord::new(1, 0)));
        // Selection does not touch search state.
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn clicks_on_walls_or_off_grid_are_ignored() {
        let mut s = session();
        assert_eq!(s.click(15.0, 15.0), Response::Ignored); // wall (1,1)
        assert_eq!(s.click(-3.0, 5.0), Response::Ignored);
        assert_eq!(s.click(40.0, 5.0), Response::Ignored);
        assert_eq!(s.start(), None);
    }

    #[test]
    fn search_requires_both_endpoints() {
        let mut s = session();
        let err = PathError::PreconditionNotMet(Precondition::EndpointsSet);
        assert_eq!(s.run_search(), Err(err.clone()));
        s.click(0.0, 0.0);
        assert_eq!(s.handle(Event::RunSearch), Response::Rejected(err.clone()));
        assert!(s.spawn_search().is_err());
        assert_eq!(s.path(), None);
    }

    #[test]
    fn search_stores_path() {
        let mut s = session();
        s.set_start(Coord::new(0, 0)).unwrap();
        s.set_goal(Coord::new(3, 2)).unwrap();
        assert_eq!(s.run_search(), Ok(Outcome::Solved { cost: 5 }));
        let path = s.path().unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(3, 2)));
    }

    #[test]
    fn unreachable_search_clears_path() {
        let mut grid = Grid::from_ascii(MAP).unwrap();
        grid.set_tile(0, 1, TileKind::Wall).unwrap();
        grid.set_tile(3, 1, TileKind::Wall).unwrap();
        let mut s = Session::with_grid(grid, SessionConfig::default());
        s.set_start(Coord::new(0, 0)).unwrap();
        s.set_goal(Coord::new(0, 2)).unwrap();
        assert_eq!(s.handle(Event::RunSearch), Response::Searched(Outcome::Unreachable));
        assert_eq!(s.path(), None);
        assert_eq!(s.outcome(), Some(Outcome::Unreachable));
    }

    #[test]
    fn endpoints_are_accepted_once() {
        let mut s = session();
        assert_eq!(s.set_start(Coord::new(0, 0)), Ok(true));
        assert_eq!(s.set_start(Coord::new(1, 0)), Ok(false));
        assert_eq!(s.start(), Some(Coord::new(0, 0)));
        assert_eq!(s.set_goal(Coord::new(1, 1)), Ok(false)); // wall
        assert!(matches!(
            s.set_goal(Coord::new(9, 9)),
            Err(PathError::OutOfBounds(_))
        ));
        assert_eq!(s.goal(), None);

        s.reset();
        assert_eq!(s.set_start(Coord::new(1, 0)), Ok(true));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = session();
        s.click(0.0, 0.0);
        s.click(30.0, 0.0);
        s.click(10.0, 0.0);
        s.run_search().unwrap();
        assert_eq!(s.handle(Event::Reset), Response::Cleared);
        assert_eq!(s.start(), None);
        assert_eq!(s.goal(), None);
        assert_eq!(s.selected(), None);
        assert_eq!(s.outcome(), None);
        assert_eq!(s.path(), None);
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let config = SessionConfig {
            seed: Some(2024),
            ..SessionConfig::default()
        };
        let mut a = Session::new(config).unwrap();
        let mut b = Session::new(config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid().width(), 32);
        assert_eq!(a.grid().height(), 18);

        a.handle(Event::Regenerate);
        b.regenerate();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn invalid_size_is_rejected() {
        let config = SessionConfig {
            width: 0,
            ..SessionConfig::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn regenerate_keeps_workers_grid() {
        let config = SessionConfig {
            seed: Some(5),
            wall_probability: 0.0,
            ..SessionConfig::default()
        };
        let mut s = Session::new(config).unwrap();
        s.set_start(Coord::new(0, 0)).unwrap();
        s.set_goal(Coord::new(31, 17)).unwrap();
        let handle = s.spawn_search().unwrap();
        s.regenerate();
        let report = handle.join().unwrap();
        assert_eq!(report.outcome, Outcome::Solved { cost: 48 });
        // Endpoints were reset by regenerate, so the report is stale.
        assert!(!s.apply_report(report));
        assert_eq!(s.path(), None);
    }

    #[test]
    fn report_from_previous_grid_is_discarded() {
        let config = SessionConfig {
            seed: Some(1),
            wall_probability: 0.4,
            ..SessionConfig::default()
        };
        let mut s = Session::with_grid(Grid::new(6, 6).unwrap(), config);
        let (start, goal) = (Coord::new(0, 0), Coord::new(5, 5));
        s.set_start(start).unwrap();
        s.set_goal(goal).unwrap();
        let handle = s.spawn_search().unwrap();

        s.regenerate();
        assert_eq!(s.generation(), 1);
        // Same endpoints again on the new grid, whose walls the old path
        // knows nothing about.
        let grid = Arc::make_mut(&mut s.grid);
        grid.set(start, TileKind::Floor).unwrap();
        grid.set(goal, TileKind::Floor).unwrap();
        assert!(s.set_start(start).unwrap());
        assert!(s.set_goal(goal).unwrap());

        let report = handle.join().unwrap();
        assert_eq!(report.generation, 0);
        assert_eq!(report.outcome, Outcome::Solved { cost: 10 });
        assert!(!s.apply_report(report));
        assert_eq!(s.path(), None);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn report_from_current_grid_is_applied() {
        let mut s = session();
        s.set_start(Coord::new(0, 0)).unwrap();
        s.set_goal(Coord::new(3, 2)).unwrap();
        let report = s.spawn_search().unwrap().join().unwrap();
        assert_eq!(report.generation, s.generation());
        assert!(s.apply_report(report));
    }

    #[test]
    fn unseeded_sessions_draw_fresh_seeds() {
        let mut a = Session::with_grid(Grid::new(16, 16).unwrap(), SessionConfig::default());
        let mut b = Session::with_grid(Grid::new(16, 16).unwrap(), SessionConfig::default());
        a.regenerate();
        b.regenerate();
        // 256 independent cells; a match is vanishingly unlikely.
        assert_ne!(a.grid(), b.grid());
    }

    #[test]
    fn seeded_grid_sessions_reproduce() {
        let config = SessionConfig {
            seed: Some(77),
            ..SessionConfig::default()
        };
        let mut a = Session::with_grid(Grid::new(16, 16).unwrap(), config);
        let mut b = Session::with_grid(Grid::new(16, 16).unwrap(), config);
        a.regenerate();
        b.regenerate();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn worker_report_is_applied() {
        let mut s = session();
        s.set_start(Coord::new(0, 2)).unwrap();
        s.set_goal(Coord::new(3, 0)).unwrap();
        let report = s.spawn_search().unwrap().join().unwrap();
        assert!(s.apply_report(report));
        assert_eq!(s.outcome(), Some(Outcome::Solved { cost: 5 }));
        assert_eq!(s.path().map(<[Coord]>::len), Some(6));
    }

    #[test]
    fn render_view() {
        let s = session();
        assert_eq!(s.tile_size(), 10.0);
        assert_eq!(s.config().width, 4);
        assert_eq!(s.config().height, 3);
        // 10 open cells; 10 undirected links, listed in both directions.
        assert_eq!(s.neighbor_links().len(), 20);
    }
}
