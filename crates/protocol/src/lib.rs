//! Wire types for the INDX search REST API.
//!
//! The server speaks several payload dialects. Each dialect gets an explicit
//! schema here so that request bodies are built from typed values and replies
//! are validated on receipt instead of being probed field by field.

mod auth;
mod coverage;
mod request;
mod response;
mod version;

pub use auth::{DatasetList, LoginResponse};
pub use coverage::{LcsCoverageSetup, WordCoverageSetup};
pub use request::{
	Algorithm, RECORDS_FOR_APPLIED_ALGORITHM, SEARCH_TIMEOUT_MS, SearchRequest, SearchRequestV32,
	SearchRequestV33,
};
pub use response::{SearchRecord, SearchResponse};
pub use version::{ProtocolVersion, UnknownProtocol};
