//! Client-side core of the INDX search demo.
//!
//! The crate splits into three layers:
//!
//! * [`session`] owns the authentication lifecycle and the bearer token.
//! * [`client`] turns a [`QueryConfiguration`] plus query text into a request,
//!   sends it, and post-processes the reply into a [`SearchResultView`].
//! * [`runtime`] issues one request per keystroke on background threads and
//!   makes sure only the most recently issued query can update the view.
//!
//! All network traffic goes through the [`http::HttpBackend`] seam so that the
//! higher layers can be exercised without a live server.

pub mod client;
mod error;
pub mod http;
pub mod query;
pub mod runtime;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod view;

pub use client::SearchClient;
pub use error::IndxError;
pub use http::{HttpBackend, HttpReply, HttpRequest, Method, TransportError, UreqBackend};
pub use indx_protocol::{
	Algorithm, DatasetList, LcsCoverageSetup, ProtocolVersion, SearchRecord, SearchResponse,
	WordCoverageSetup,
};
pub use query::{CoverageSettings, DEFAULT_ENDPOINT, QueryConfiguration};
pub use runtime::{SearchCompletion, SearchRuntime, ViewSlot};
pub use session::{AuthStatus, BearerToken, Credentials, Session, SessionManager};
pub use view::{Confidence, SearchResultView};
