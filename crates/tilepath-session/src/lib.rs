//! Search control for interactive front-ends.
//!
//! A [`Session`] sits between a renderer/input layer and the path engine: it
//! owns the grid, turns pointer clicks into start and goal selections, runs
//! searches on request, and keeps the last path around for drawing.
//! [`spawn_search`] runs a search to completion on a worker thread.

pub mod config;
pub mod session;
pub mod worker;

pub use config::SessionConfig;
pub use session::{Event, Response, Session};
pub use worker::{SearchHandle, SearchReport, search, spawn_search};
