//! Coverage tuning blocks embedded in search requests.
//!
//! These values are forwarded verbatim; the client never interprets them.

use serde::{Deserialize, Serialize};

/// LCS tolerance setup understood by protocol 3.2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsCoverageSetup {
	pub lcs_top_error_tolerance: u32,
	// The server spells this one without the second "i".
	#[serde(rename = "lcsTopMaxRepetions")]
	pub lcs_top_max_repetitions: u32,
	pub lcs_error_tolerance: u32,
	pub lcs_max_repetitions: u32,
	pub lcs_bottom_error_tolerance: u32,
	pub lcs_bottom_max_repetitions: u32,
	pub lcs_word_min_word_size: u32,
	pub lcs_word_lcs_error_tolerance: u32,
	pub lcs_word_lcs_max_repetitions: u32,
	pub coverage_min_word_hits_abs: u32,
	pub coverage_min_word_hits_relative: f64,
	pub coverage_q_limit_for_error_tolerance: u32,
	#[serde(rename = "coverageLcsErrorToleranceRelativeq")]
	pub coverage_lcs_error_tolerance_relative_q: f64,
}

impl Default for LcsCoverageSetup {
	fn default() -> Self {
		Self {
			lcs_top_error_tolerance: 0,
			lcs_top_max_repetitions: 0,
			lcs_error_tolerance: 0,
			lcs_max_repetitions: 0,
			lcs_bottom_error_tolerance: 0,
			lcs_bottom_max_repetitions: 0,
			lcs_word_min_word_size: 2,
			lcs_word_lcs_error_tolerance: 0,
			lcs_word_lcs_max_repetitions: 0,
			coverage_min_word_hits_abs: 1,
			coverage_min_word_hits_relative: 0.0,
			coverage_q_limit_for_error_tolerance: 5,
			coverage_lcs_error_tolerance_relative_q: 0.2,
		}
	}
}

impl LcsCoverageSetup {
	/// Return the name and value of the first fractional tolerance that is
	/// negative or not finite.
	#[must_use]
	pub fn invalid_tolerance(&self) -> Option<(&'static str, f64)> {
		[
			(
				"coverage_min_word_hits_relative",
				self.coverage_min_word_hits_relative,
			),
			(
				"coverage_lcs_error_tolerance_relative_q",
				self.coverage_lcs_error_tolerance_relative_q,
			),
		]
		.into_iter()
		.find(|(_, value)| !value.is_finite() || *value < 0.0)
	}
}

/// Word coverage setup understood by protocol 3.3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCoverageSetup {
	pub min_word_size: u32,
	pub levenshtein_max_word_size: u32,
	pub cover_whole_words: bool,
	pub cover_whole_query: bool,
	pub cover_fuzzy_words: bool,
	pub cover_joined_words: bool,
	pub cover_prefix_suffix: bool,
	pub coverage_depth: u32,
	pub truncate: bool,
	pub truncation_score: u32,
}

impl Default for WordCoverageSetup {
	fn default() -> Self {
		Self {
			min_word_size: 2,
			levenshtein_max_word_size: 20,
			cover_whole_words: true,
			cover_whole_query: true,
			cover_fuzzy_words: true,
			cover_joined_words: true,
			cover_prefix_suffix: true,
			coverage_depth: 500,
			truncate: true,
			truncation_score: 40,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Value;

	use super::*;

	#[test]
	fn lcs_setup_uses_server_field_names() {
		let value = serde_json::to_value(LcsCoverageSetup::default()).expect("serialize");
		assert_eq!(value["lcsTopMaxRepetions"], Value::from(0));
		assert_eq!(value["lcsWordMinWordSize"], Value::from(2));
		assert_eq!(value["coverageQLimitForErrorTolerance"], Value::from(5));
		assert_eq!(value["coverageLcsErrorToleranceRelativeq"], Value::from(0.2));
		assert!(value.get("lcsTopMaxRepetitions").is_none());
	}

	#[test]
	fn word_setup_uses_camel_case() {
		let value = serde_json::to_value(WordCoverageSetup::default()).expect("serialize");
		assert_eq!(value["coverFuzzyWords"], Value::Bool(true));
		assert_eq!(value["levenshteinMaxWordSize"], Value::from(20));
	}

	#[test]
	fn negative_fraction_is_reported() {
		let setup = LcsCoverageSetup {
			coverage_lcs_error_tolerance_relative_q: -0.5,
			..LcsCoverageSetup::default()
		};
		assert_eq!(
			setup.invalid_tolerance(),
			Some(("coverage_lcs_error_tolerance_relative_q", -0.5))
		);
		assert_eq!(LcsCoverageSetup::default().invalid_tolerance(), None);
	}
}
