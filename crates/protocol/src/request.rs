use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coverage::{LcsCoverageSetup, WordCoverageSetup};
use crate::version::ProtocolVersion;

/// Server-side deadline requested in every search body, in milliseconds.
pub const SEARCH_TIMEOUT_MS: u32 = 1000;

/// Number of candidates the server evaluates before trimming to the return cap.
pub const RECORDS_FOR_APPLIED_ALGORITHM: u32 = 1000;

/// Ranking strategy requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
	/// Plain relevancy ranking.
	Relevancy,
	/// Coverage detection of whole, joined and partially mistyped words.
	#[default]
	Coverage,
}

impl Algorithm {
	/// Numeric code used by protocol 3.2.
	#[must_use]
	pub const fn code(self) -> u8 {
		match self {
			Self::Relevancy => 0,
			Self::Coverage => 1,
		}
	}

	#[must_use]
	pub const fn from_code(code: u8) -> Self {
		if code == 0 {
			Self::Relevancy
		} else {
			Self::Coverage
		}
	}

	#[must_use]
	pub const fn applies_coverage(self) -> bool {
		matches!(self, Self::Coverage)
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Relevancy => f.write_str("relevancy (0)"),
			Self::Coverage => f.write_str("coverage (1)"),
		}
	}
}

/// Search body for protocol 3.2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestV32 {
	pub algorithm: u8,
	pub key_exclude_filter: Option<Vec<String>>,
	pub key_include_filter: Option<Vec<String>>,
	pub log_prefix: String,
	pub max_number_of_records_to_return: u32,
	pub remove_duplicates: bool,
	pub sought_text: String,
	pub time_out_limit_milliseconds: u32,
	pub coverage_setup: LcsCoverageSetup,
	pub number_of_records_for_applied_algorithm: u32,
}

/// Search body for protocol 3.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestV33 {
	pub apply_coverage: bool,
	pub key_exclude_filter: Option<Vec<String>>,
	pub key_include_filter: Option<Vec<String>>,
	pub log_prefix: String,
	pub max_number_of_records_to_return: u32,
	pub remove_duplicates: bool,
	pub query_text: String,
	pub time_out_limit_milliseconds: u32,
	pub coverage_setup: WordCoverageSetup,
	pub number_of_records_for_applied_algorithm: u32,
}

/// A search body in whichever dialect the target server speaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchRequest {
	V3_2(SearchRequestV32),
	V3_3(SearchRequestV33),
}

impl SearchRequest {
	#[must_use]
	pub fn version(&self) -> ProtocolVersion {
		match self {
			Self::V3_2(_) => ProtocolVersion::V3_2,
			Self::V3_3(_) => ProtocolVersion::V3_3,
		}
	}

	/// The raw query text carried by the body.
	#[must_use]
	pub fn query_text(&self) -> &str {
		match self {
			Self::V3_2(body) => &body.sought_text,
			Self::V3_3(body) => &body.query_text,
		}
	}

	#[must_use]
	pub fn max_records(&self) -> u32 {
		match self {
			Self::V3_2(body) => body.max_number_of_records_to_return,
			Self::V3_3(body) => body.max_number_of_records_to_return,
		}
	}

	#[must_use]
	pub fn remove_duplicates(&self) -> bool {
		match self {
			Self::V3_2(body) => body.remove_duplicates,
			Self::V3_3(body) => body.remove_duplicates,
		}
	}

	#[must_use]
	pub fn algorithm(&self) -> Algorithm {
		match self {
			Self::V3_2(body) => Algorithm::from_code(body.algorithm),
			Self::V3_3(body) if body.apply_coverage => Algorithm::Coverage,
			Self::V3_3(_) => Algorithm::Relevancy,
		}
	}

	/// Serialize the body to JSON bytes.
	pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec(self)
	}

	/// Parse a body previously produced for `version`.
	pub fn parse(version: ProtocolVersion, bytes: &[u8]) -> serde_json::Result<Self> {
		match version {
			ProtocolVersion::V3_2 => serde_json::from_slice(bytes).map(Self::V3_2),
			ProtocolVersion::V3_3 => serde_json::from_slice(bytes).map(Self::V3_3),
		}
	}
}
