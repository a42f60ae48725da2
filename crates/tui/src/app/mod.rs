//! Application state and behavior for the interactive search screen.
//!
//! Supporting modules partition the implementation: actions (key handling),
//! rendering, and search/session coordination.

mod actions;
mod render;
mod search;
mod state;

pub use state::{App, SearchOutcome};
