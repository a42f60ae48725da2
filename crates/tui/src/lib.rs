//! Interactive terminal front end for the INDX search client.
//!
//! Every keystroke that changes the query issues a search through
//! [`indx_core::SearchRuntime`]; the screen always shows the results of the
//! most recently typed query, annotated against the server's truncation
//! boundary.

mod app;
pub mod components;
mod config;
pub mod input;
mod runtime;
pub mod style;
#[cfg(test)]
mod tests;

pub use app::{App, SearchOutcome};
pub use config::UiLabels;
pub use input::QueryInput;
pub use style::Theme;
