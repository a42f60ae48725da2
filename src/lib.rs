//! Library side of the `indx-search` binary.
//!
//! Re-exports the client, session and terminal UI types so that embedders can
//! drive a search session without digging through the workspace crates.

pub mod app_dirs;
pub mod logging;

pub use indx_core::{
	Algorithm, AuthStatus, Confidence, CoverageSettings, Credentials, IndxError, LcsCoverageSetup,
	ProtocolVersion, QueryConfiguration, SearchClient, SearchRecord, SearchResponse,
	SearchResultView, SearchRuntime, Session, SessionManager, WordCoverageSetup,
};
pub use indx_tui::{App, SearchOutcome, Theme, UiLabels};
