use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// REST protocol revision spoken by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProtocolVersion {
	/// Heap-addressed search with LCS tolerance tuning.
	#[serde(rename = "3.2", alias = "v3.2")]
	V3_2,
	/// Dataset-addressed search with word coverage toggles.
	#[default]
	#[serde(rename = "3.3", alias = "v3.3")]
	V3_3,
}

impl ProtocolVersion {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::V3_2 => "3.2",
			Self::V3_3 => "3.3",
		}
	}

	/// Whether the service exposes `Search/datasets` for this revision.
	#[must_use]
	pub const fn supports_dataset_listing(self) -> bool {
		matches!(self, Self::V3_3)
	}

	/// Relative path of the search endpoint for a heap or dataset.
	#[must_use]
	pub fn search_path(self, dataset: &str) -> String {
		format!("Search/{dataset}")
	}
}

impl fmt::Display for ProtocolVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown protocol version '{0}' (expected 3.2 or 3.3)")]
pub struct UnknownProtocol(pub String);

impl FromStr for ProtocolVersion {
	type Err = UnknownProtocol;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let trimmed = value.trim();
		let normalized = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
		match normalized {
			"3.2" | "32" => Ok(Self::V3_2),
			"3.3" | "33" => Ok(Self::V3_3),
			_ => Err(UnknownProtocol(value.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_common_spellings() {
		assert_eq!("3.2".parse(), Ok(ProtocolVersion::V3_2));
		assert_eq!("v3.3".parse(), Ok(ProtocolVersion::V3_3));
		assert_eq!(" 33 ".parse(), Ok(ProtocolVersion::V3_3));
		assert!("4.0".parse::<ProtocolVersion>().is_err());
	}

	#[test]
	fn only_latest_lists_datasets() {
		assert!(!ProtocolVersion::V3_2.supports_dataset_listing());
		assert!(ProtocolVersion::V3_3.supports_dataset_listing());
	}
}
