use serde::Deserialize;

use crate::cli::CliArgs;

/// Request tuning read from `[search]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) results: Option<u32>,
	pub(super) algorithm: Option<String>,
	pub(super) score_min: Option<u16>,
	pub(super) truncate: Option<bool>,
	pub(super) remove_duplicates: Option<bool>,
	pub(super) log_prefix: Option<String>,
	pub(super) key_include: Option<KeyList>,
	pub(super) key_exclude: Option<KeyList>,
}

/// Document key filter, written as a TOML array or a comma separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum KeyList {
	List(Vec<String>),
	Joined(String),
}

impl KeyList {
	fn into_keys(self) -> Vec<String> {
		match self {
			KeyList::List(keys) => keys,
			KeyList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
		}
	}
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.results {
			self.results = Some(value);
		}
		if let Some(value) = cli.algorithm {
			self.algorithm = Some(value.as_str().to_string());
		}
		if let Some(value) = cli.score_min {
			self.score_min = Some(value);
		}
		if let Some(value) = cli.truncate {
			self.truncate = Some(value);
		}
		if let Some(value) = cli.remove_duplicates {
			self.remove_duplicates = Some(value);
		}
	}
}

/// Drop blank entries; an empty filter list means no filter at all.
pub(super) fn sanitize_keys(keys: Option<KeyList>) -> Option<Vec<String>> {
	let keys: Vec<String> = keys?
		.into_keys()
		.into_iter()
		.map(|key| key.trim().to_string())
		.filter(|key| !key.is_empty())
		.collect();
	if keys.is_empty() { None } else { Some(keys) }
}
