use serde::{Deserialize, Serialize};

/// A single match returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
	/// Match score on the server's 0-255 scale.
	pub metric_score: u16,
	#[serde(rename = "documentTextToBeIndexed")]
	pub document_text: String,
	pub document_key: String,
	pub segment_number: u32,
}

impl SearchRecord {
	pub fn new(
		metric_score: u16,
		document_text: impl Into<String>,
		document_key: impl Into<String>,
		segment_number: u32,
	) -> Self {
		Self {
			metric_score,
			document_text: document_text.into(),
			document_key: document_key.into(),
			segment_number,
		}
	}
}

/// Reply body shared by every protocol revision.
///
/// `searchRecords` is mandatory: a reply without it fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub search_records: Vec<SearchRecord>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub coverage_bottom_index: Option<i64>,
}

impl SearchResponse {
	pub fn parse(body: &str) -> serde_json::Result<Self> {
		serde_json::from_str(body)
	}

	/// The truncation boundary, if the server supplied a usable one.
	#[must_use]
	pub fn bottom_index(&self) -> Option<usize> {
		self.coverage_bottom_index
			.and_then(|index| usize::try_from(index).ok())
	}
}
