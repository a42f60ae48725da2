use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated value came from, for error messages.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) url: Option<SettingSource>,
	pub(crate) protocol: Option<SettingSource>,
	pub(crate) dataset: Option<SettingSource>,
	pub(crate) results: Option<SettingSource>,
	pub(crate) algorithm: Option<SettingSource>,
	pub(crate) score_min: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_url(&self) -> SettingSource {
		or_key(&self.url, "server.url")
	}

	pub(crate) fn source_for_protocol(&self) -> SettingSource {
		or_key(&self.protocol, "server.protocol")
	}

	pub(crate) fn source_for_dataset(&self) -> SettingSource {
		or_key(&self.dataset, "server.dataset")
	}

	pub(crate) fn source_for_results(&self) -> SettingSource {
		or_key(&self.results, "search.results")
	}

	pub(crate) fn source_for_algorithm(&self) -> SettingSource {
		or_key(&self.algorithm, "search.algorithm")
	}

	pub(crate) fn source_for_score_min(&self) -> SettingSource {
		or_key(&self.score_min, "search.score_min")
	}
}

fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
	source.clone().unwrap_or(SettingSource::ConfigKey(key))
}
