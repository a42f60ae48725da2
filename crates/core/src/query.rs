//! The per-request configuration snapshot and request construction.

use std::num::NonZeroU32;

use indx_protocol::{
	Algorithm, LcsCoverageSetup, ProtocolVersion, RECORDS_FOR_APPLIED_ALGORITHM,
	SEARCH_TIMEOUT_MS, SearchRequest, SearchRequestV32, SearchRequestV33, WordCoverageSetup,
};

use crate::IndxError;

/// Base URL of the public INDX API.
pub const DEFAULT_ENDPOINT: &str = "https://api.indx.co/api/";

const DEFAULT_RESULTS: u32 = 30;
const DEFAULT_SCORE_MIN: u16 = 30;
const MAX_SCORE: u16 = 255;

/// Coverage tuning for both protocol dialects. Only the block matching the
/// active protocol is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSettings {
	pub lcs: LcsCoverageSetup,
	pub words: WordCoverageSetup,
}

/// Everything a single search request depends on apart from the query text
/// and the bearer token.
///
/// Values are replaced, never edited in place, once handed to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfiguration {
	/// Base URL, normally ending with `/`.
	pub endpoint: String,
	pub protocol: ProtocolVersion,
	/// Heap (3.2) or dataset (3.3) identifier.
	pub dataset: String,
	pub results_cap: NonZeroU32,
	pub algorithm: Algorithm,
	/// Minimum metric score for queries longer than one character.
	pub score_min: u16,
	pub truncate: bool,
	pub show_meta: bool,
	pub remove_duplicates: bool,
	pub key_include_filter: Option<Vec<String>>,
	pub key_exclude_filter: Option<Vec<String>>,
	pub log_prefix: String,
	pub coverage: CoverageSettings,
}

impl Default for QueryConfiguration {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			protocol: ProtocolVersion::default(),
			dataset: "0".to_string(),
			results_cap: NonZeroU32::new(DEFAULT_RESULTS).unwrap_or(NonZeroU32::MIN),
			algorithm: Algorithm::default(),
			score_min: DEFAULT_SCORE_MIN,
			truncate: true,
			show_meta: false,
			remove_duplicates: true,
			key_include_filter: None,
			key_exclude_filter: None,
			log_prefix: String::new(),
			coverage: CoverageSettings::default(),
		}
	}
}

impl QueryConfiguration {
	/// Check the invariants the server relies on.
	pub fn validate(&self) -> Result<(), IndxError> {
		let endpoint = self.endpoint.trim();
		if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
			return Err(IndxError::invalid(
				"endpoint",
				format!("'{}' is not an http(s) URL", self.endpoint),
			));
		}
		if self.dataset.trim().is_empty() {
			return Err(IndxError::invalid("dataset", "must not be empty"));
		}
		if self.score_min > MAX_SCORE {
			return Err(IndxError::invalid(
				"score_min",
				format!("{} exceeds the 0-{MAX_SCORE} score scale", self.score_min),
			));
		}
		if let Some((field, value)) = self.coverage.lcs.invalid_tolerance() {
			return Err(IndxError::invalid(
				"coverage",
				format!("{field} must be a non-negative number (got {value})"),
			));
		}
		Ok(())
	}

	#[must_use]
	pub fn with_truncate(self, truncate: bool) -> Self {
		Self { truncate, ..self }
	}

	#[must_use]
	pub fn with_show_meta(self, show_meta: bool) -> Self {
		Self { show_meta, ..self }
	}

	#[must_use]
	pub fn with_dataset(self, dataset: impl Into<String>) -> Self {
		Self {
			dataset: dataset.into(),
			..self
		}
	}

	/// Join a relative API path onto the endpoint.
	#[must_use]
	pub fn url_for(&self, path: &str) -> String {
		join_url(&self.endpoint, path)
	}

	#[must_use]
	pub fn search_url(&self) -> String {
		self.url_for(&self.protocol.search_path(self.dataset.trim()))
	}

	#[must_use]
	pub fn datasets_url(&self) -> String {
		self.url_for("Search/datasets")
	}

	/// Build the request body for `query` in the configured dialect.
	#[must_use]
	pub fn build_request(&self, query: &str) -> SearchRequest {
		match self.protocol {
			ProtocolVersion::V3_2 => SearchRequest::V3_2(SearchRequestV32 {
				algorithm: self.algorithm.code(),
				key_exclude_filter: self.key_exclude_filter.clone(),
				key_include_filter: self.key_include_filter.clone(),
				log_prefix: self.log_prefix.clone(),
				max_number_of_records_to_return: self.results_cap.get(),
				remove_duplicates: self.remove_duplicates,
				sought_text: query.to_string(),
				time_out_limit_milliseconds: SEARCH_TIMEOUT_MS,
				coverage_setup: self.coverage.lcs.clone(),
				number_of_records_for_applied_algorithm: RECORDS_FOR_APPLIED_ALGORITHM,
			}),
			ProtocolVersion::V3_3 => SearchRequest::V3_3(SearchRequestV33 {
				apply_coverage: self.algorithm.applies_coverage(),
				key_exclude_filter: self.key_exclude_filter.clone(),
				key_include_filter: self.key_include_filter.clone(),
				log_prefix: self.log_prefix.clone(),
				max_number_of_records_to_return: self.results_cap.get(),
				remove_duplicates: self.remove_duplicates,
				query_text: query.to_string(),
				time_out_limit_milliseconds: SEARCH_TIMEOUT_MS,
				coverage_setup: self.coverage.words.clone(),
				number_of_records_for_applied_algorithm: RECORDS_FOR_APPLIED_ALGORITHM,
			}),
		}
	}

	/// Rebuild a configuration from a request body, taking the client-only
	/// fields (endpoint, dataset, threshold, display flags) from `self`.
	pub fn merge_request(&self, request: &SearchRequest) -> Result<Self, IndxError> {
		let results_cap = NonZeroU32::new(request.max_records())
			.ok_or_else(|| IndxError::invalid("results_cap", "must be greater than zero"))?;
		let mut merged = Self {
			protocol: request.version(),
			results_cap,
			algorithm: request.algorithm(),
			remove_duplicates: request.remove_duplicates(),
			..self.clone()
		};
		match request {
			SearchRequest::V3_2(body) => {
				merged.key_include_filter = body.key_include_filter.clone();
				merged.key_exclude_filter = body.key_exclude_filter.clone();
				merged.log_prefix = body.log_prefix.clone();
				merged.coverage.lcs = body.coverage_setup.clone();
			}
			SearchRequest::V3_3(body) => {
				merged.key_include_filter = body.key_include_filter.clone();
				merged.key_exclude_filter = body.key_exclude_filter.clone();
				merged.log_prefix = body.log_prefix.clone();
				merged.coverage.words = body.coverage_setup.clone();
			}
		}
		Ok(merged)
	}
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
	let base = base.trim();
	if base.ends_with('/') {
		format!("{base}{path}")
	} else {
		format!("{base}/{path}")
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn tuned(protocol: ProtocolVersion) -> QueryConfiguration {
		QueryConfiguration {
			endpoint: "https://search.example.test/api/".into(),
			protocol,
			dataset: "7".into(),
			results_cap: NonZeroU32::new(12).expect("non-zero"),
			algorithm: Algorithm::Relevancy,
			score_min: 80,
			truncate: false,
			show_meta: true,
			remove_duplicates: false,
			key_include_filter: Some(vec!["a".into(), "b".into()]),
			key_exclude_filter: None,
			log_prefix: "demo".into(),
			coverage: CoverageSettings {
				lcs: LcsCoverageSetup {
					lcs_top_error_tolerance: 3,
					lcs_word_min_word_size: 4,
					coverage_lcs_error_tolerance_relative_q: 0.35,
					..LcsCoverageSetup::default()
				},
				words: WordCoverageSetup {
					cover_fuzzy_words: false,
					coverage_depth: 120,
					..WordCoverageSetup::default()
				},
			},
		}
	}

	fn body_fields_reset(config: &QueryConfiguration) -> QueryConfiguration {
		QueryConfiguration {
			endpoint: config.endpoint.clone(),
			dataset: config.dataset.clone(),
			score_min: config.score_min,
			truncate: config.truncate,
			show_meta: config.show_meta,
			..QueryConfiguration::default()
		}
	}

	fn round_trip(config: &QueryConfiguration) -> QueryConfiguration {
		let bytes = config.build_request("anything").to_json().expect("serialize");
		let parsed = SearchRequest::parse(config.protocol, &bytes).expect("parse");
		let mut template = body_fields_reset(config);
		// The inactive dialect's coverage block is not on the wire.
		match config.protocol {
			ProtocolVersion::V3_2 => template.coverage.words = config.coverage.words.clone(),
			ProtocolVersion::V3_3 => template.coverage.lcs = config.coverage.lcs.clone(),
		}
		template.merge_request(&parsed).expect("merge")
	}

	#[test]
	fn request_round_trip_keeps_every_field() {
		for protocol in [ProtocolVersion::V3_2, ProtocolVersion::V3_3] {
			let config = tuned(protocol);
			assert_eq!(round_trip(&config), config, "protocol {protocol}");
		}
	}

	#[test]
	fn urls_join_cleanly() {
		let config = QueryConfiguration::default().with_dataset("books");
		assert_eq!(config.search_url(), "https://api.indx.co/api/Search/books");

		let config = QueryConfiguration {
			endpoint: "http://localhost:5000/api".into(),
			..QueryConfiguration::default()
		};
		assert_eq!(config.datasets_url(), "http://localhost:5000/api/Search/datasets");
	}

	#[test]
	fn body_carries_fixed_limits() {
		let request = QueryConfiguration::default().build_request("oslo");
		let SearchRequest::V3_3(body) = request else {
			panic!("default protocol is 3.3");
		};
		assert_eq!(body.query_text, "oslo");
		assert_eq!(body.time_out_limit_milliseconds, 1000);
		assert_eq!(body.number_of_records_for_applied_algorithm, 1000);
		assert_eq!(body.max_number_of_records_to_return, 30);
		assert!(body.apply_coverage);
	}

	#[test]
	fn validation_rejects_bad_values() {
		assert!(QueryConfiguration::default().validate().is_ok());

		let config = QueryConfiguration {
			endpoint: "ftp://nope".into(),
			..QueryConfiguration::default()
		};
		assert!(matches!(
			config.validate(),
			Err(IndxError::InvalidConfiguration { field: "endpoint", .. })
		));

		let mut config = QueryConfiguration::default();
		config.coverage.lcs.coverage_min_word_hits_relative = -1.0;
		assert!(matches!(
			config.validate(),
			Err(IndxError::InvalidConfiguration { field: "coverage", .. })
		));

		let config = QueryConfiguration {
			score_min: 300,
			..QueryConfiguration::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn zero_cap_in_body_is_rejected() {
		let mut request = QueryConfiguration::default().build_request("x");
		if let SearchRequest::V3_3(body) = &mut request {
			body.max_number_of_records_to_return = 0;
		}
		assert!(QueryConfiguration::default().merge_request(&request).is_err());
	}

	proptest! {
		#[test]
		fn forwarded_fields_survive_serialization(
			cap in 1u32..10_000,
			dedup in any::<bool>(),
			coverage in any::<bool>(),
			prefix in "[a-z]{0,8}",
			min_word in 0u32..16,
			relative in 0.0f64..1.0,
			v32 in any::<bool>(),
		) {
			let protocol = if v32 { ProtocolVersion::V3_2 } else { ProtocolVersion::V3_3 };
			let mut config = QueryConfiguration {
				protocol,
				results_cap: NonZeroU32::new(cap).expect("non-zero"),
				remove_duplicates: dedup,
				algorithm: if coverage { Algorithm::Coverage } else { Algorithm::Relevancy },
				log_prefix: prefix,
				..QueryConfiguration::default()
			};
			config.coverage.lcs.lcs_word_min_word_size = min_word;
			config.coverage.lcs.coverage_min_word_hits_relative = relative;
			config.coverage.words.min_word_size = min_word;
			prop_assert_eq!(round_trip(&config), config);
		}
	}
}
