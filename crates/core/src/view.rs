//! Post-processed search results as the front end sees them.

use indx_protocol::{SearchRecord, SearchResponse};

use crate::QueryConfiguration;

/// How a row relates to the server's truncation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
	Confident,
	/// The row sitting exactly on the boundary.
	LastConfident,
	BelowConfidence,
}

impl Confidence {
	#[must_use]
	pub const fn is_below(self) -> bool {
		matches!(self, Self::BelowConfidence)
	}
}

/// Records accepted from one response plus the optional truncation boundary.
///
/// A view is rebuilt from scratch for every response and replaced wholesale.
/// Truncation only annotates rows; it never removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultView {
	records: Vec<SearchRecord>,
	truncate_at: Option<usize>,
}

impl SearchResultView {
	#[must_use]
	pub fn empty() -> Self {
		Self::default()
	}

	/// Apply the score threshold and truncation settings to a parsed reply.
	///
	/// Queries of at most one character keep every record so a near-empty
	/// prompt is not pruned to nothing.
	#[must_use]
	pub fn from_response(
		query: &str,
		response: SearchResponse,
		config: &QueryConfiguration,
	) -> Self {
		let truncate_at = if config.truncate {
			response.bottom_index()
		} else {
			None
		};
		let mut records = response.search_records;
		if query.chars().count() > 1 {
			records.retain(|record| record.metric_score >= config.score_min);
		}
		Self {
			records,
			truncate_at,
		}
	}

	#[must_use]
	pub fn records(&self) -> &[SearchRecord] {
		&self.records
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.records.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	#[must_use]
	pub fn truncation_boundary(&self) -> Option<usize> {
		self.truncate_at
	}

	/// The boundary in the server's convention: `-1` when there is none.
	#[must_use]
	pub fn truncation_index(&self) -> i64 {
		self.truncate_at
			.and_then(|index| i64::try_from(index).ok())
			.unwrap_or(-1)
	}

	#[must_use]
	pub fn confidence(&self, index: usize) -> Confidence {
		match self.truncate_at {
			Some(boundary) if index == boundary => Confidence::LastConfident,
			Some(boundary) if index > boundary => Confidence::BelowConfidence,
			_ => Confidence::Confident,
		}
	}

	/// Records paired with their confidence annotation, in server order.
	pub fn annotated(&self) -> impl Iterator<Item = (&SearchRecord, Confidence)> + '_ {
		self.records
			.iter()
			.enumerate()
			.map(|(index, record)| (record, self.confidence(index)))
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn response(scores: &[u16], bottom: Option<i64>) -> SearchResponse {
		SearchResponse {
			search_records: scores
				.iter()
				.enumerate()
				.map(|(i, score)| SearchRecord::new(*score, format!("doc {i}"), format!("k{i}"), 0))
				.collect(),
			coverage_bottom_index: bottom,
		}
	}

	fn config(truncate: bool, score_min: u16) -> QueryConfiguration {
		QueryConfiguration {
			truncate,
			score_min,
			..QueryConfiguration::default()
		}
	}

	fn filtered(
		query: &str,
		scores: &[u16],
		bottom: Option<i64>,
		config: &QueryConfiguration,
	) -> SearchResultView {
		SearchResultView::from_response(query, response(scores, bottom), config)
	}

	#[test]
	fn boundary_row_is_last_confident() {
		let view = filtered("oslo", &[200, 180, 150, 90], Some(1), &config(true, 30));
		let marks: Vec<_> = view.annotated().map(|(_, mark)| mark).collect();
		assert_eq!(
			marks,
			[
				Confidence::Confident,
				Confidence::LastConfident,
				Confidence::BelowConfidence,
				Confidence::BelowConfidence,
			]
		);
		assert_eq!(view.truncation_index(), 1);
	}

	#[test]
	fn order_is_preserved() {
		let view = filtered("ab", &[40, 250, 90], None, &config(true, 30));
		let keys: Vec<_> = view.records().iter().map(|r| r.document_key.as_str()).collect();
		assert_eq!(keys, ["k0", "k1", "k2"]);
	}

	#[test]
	fn single_character_is_counted_in_chars() {
		let view = filtered("ø", &[1, 2], None, &config(true, 30));
		assert_eq!(view.len(), 2);
	}

	#[test]
	fn empty_view_has_no_boundary() {
		let view = SearchResultView::empty();
		assert!(view.is_empty());
		assert_eq!(view.truncation_index(), -1);
		assert_eq!(view.confidence(0), Confidence::Confident);
	}

	fn scores() -> impl Strategy<Value = Vec<u16>> {
		prop::collection::vec(0u16..=255, 0..40)
	}

	proptest! {
		#[test]
		fn short_queries_keep_everything(
			scores in scores(),
			query in "[a-z]{0,1}",
			threshold in 0u16..=255,
		) {
			let view = filtered(&query, &scores, None, &config(false, threshold));
			prop_assert_eq!(view.len(), scores.len());
		}

		#[test]
		fn long_queries_respect_threshold(
			scores in scores(),
			query in "[a-z]{2,12}",
			threshold in 0u16..=255,
		) {
			let view = filtered(&query, &scores, None, &config(false, threshold));
			prop_assert!(view.records().iter().all(|r| r.metric_score >= threshold));
			let expected = scores.iter().filter(|s| **s >= threshold).count();
			prop_assert_eq!(view.len(), expected);
		}

		#[test]
		fn disabled_truncation_never_annotates(
			scores in scores(),
			bottom in prop::option::of(-3i64..40),
		) {
			let view = filtered("x", &scores, bottom, &config(false, 0));
			prop_assert_eq!(view.truncation_index(), -1);
			prop_assert!(view.annotated().all(|(_, mark)| !mark.is_below()));
		}

		#[test]
		fn enabled_truncation_splits_at_boundary(
			scores in scores(),
			bottom in 0i64..40,
		) {
			let view = filtered("x", &scores, Some(bottom), &config(true, 0));
			prop_assert_eq!(view.truncation_index(), bottom);
			for (index, (_, mark)) in view.annotated().enumerate() {
				prop_assert_eq!(mark.is_below(), index as i64 > bottom);
			}
		}
	}
}
