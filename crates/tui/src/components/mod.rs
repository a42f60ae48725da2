//! Widgets composing the search screen.

pub mod header;
pub mod prompt;
pub mod tables;

pub use header::{HeaderContext, render_header};
pub use prompt::{InputContext, ProgressState, render_input};
pub use tables::{ResultsPane, render_results};
