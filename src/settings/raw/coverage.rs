use indx_search::{LcsCoverageSetup, WordCoverageSetup};
use serde::Deserialize;

/// `[coverage]`: tuning forwarded to the server untouched. Protocol 3.2 reads
/// the `lcs` table, protocol 3.3 the `words` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct CoverageSection {
	pub(super) lcs: LcsSection,
	pub(super) words: WordsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LcsSection {
	pub(super) top_error_tolerance: Option<u32>,
	pub(super) top_max_repetitions: Option<u32>,
	pub(super) error_tolerance: Option<u32>,
	pub(super) max_repetitions: Option<u32>,
	pub(super) bottom_error_tolerance: Option<u32>,
	pub(super) bottom_max_repetitions: Option<u32>,
	pub(super) word_min_word_size: Option<u32>,
	pub(super) word_error_tolerance: Option<u32>,
	pub(super) word_max_repetitions: Option<u32>,
	pub(super) min_word_hits_abs: Option<u32>,
	pub(super) min_word_hits_relative: Option<f64>,
	pub(super) q_limit_for_error_tolerance: Option<u32>,
	pub(super) error_tolerance_relative_q: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct WordsSection {
	pub(super) min_word_size: Option<u32>,
	pub(super) levenshtein_max_word_size: Option<u32>,
	pub(super) cover_whole_words: Option<bool>,
	pub(super) cover_whole_query: Option<bool>,
	pub(super) cover_fuzzy_words: Option<bool>,
	pub(super) cover_joined_words: Option<bool>,
	pub(super) cover_prefix_suffix: Option<bool>,
	pub(super) coverage_depth: Option<u32>,
	pub(super) truncate: Option<bool>,
	pub(super) truncation_score: Option<u32>,
}

macro_rules! overlay {
	($target:ident, $source:ident, { $($field:ident => $dest:ident),* $(,)? }) => {
		$(
			if let Some(value) = $source.$field {
				$target.$dest = value;
			}
		)*
	};
}

impl LcsSection {
	pub(super) fn resolve(self) -> LcsCoverageSetup {
		let mut setup = LcsCoverageSetup::default();
		overlay!(setup, self, {
			top_error_tolerance => lcs_top_error_tolerance,
			top_max_repetitions => lcs_top_max_repetitions,
			error_tolerance => lcs_error_tolerance,
			max_repetitions => lcs_max_repetitions,
			bottom_error_tolerance => lcs_bottom_error_tolerance,
			bottom_max_repetitions => lcs_bottom_max_repetitions,
			word_min_word_size => lcs_word_min_word_size,
			word_error_tolerance => lcs_word_lcs_error_tolerance,
			word_max_repetitions => lcs_word_lcs_max_repetitions,
			min_word_hits_abs => coverage_min_word_hits_abs,
			min_word_hits_relative => coverage_min_word_hits_relative,
			q_limit_for_error_tolerance => coverage_q_limit_for_error_tolerance,
			error_tolerance_relative_q => coverage_lcs_error_tolerance_relative_q,
		});
		setup
	}
}

impl WordsSection {
	pub(super) fn resolve(self) -> WordCoverageSetup {
		let mut setup = WordCoverageSetup::default();
		overlay!(setup, self, {
			min_word_size => min_word_size,
			levenshtein_max_word_size => levenshtein_max_word_size,
			cover_whole_words => cover_whole_words,
			cover_whole_query => cover_whole_query,
			cover_fuzzy_words => cover_fuzzy_words,
			cover_joined_words => cover_joined_words,
			cover_prefix_suffix => cover_prefix_suffix,
			coverage_depth => coverage_depth,
			truncate => truncate,
			truncation_score => truncation_score,
		});
		setup
	}
}
