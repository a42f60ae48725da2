use indx_search::{Credentials, QueryConfiguration, UiLabels};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// the demo defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub query: QueryConfiguration,
	pub credentials: Option<Credentials>,
	pub ui: UiLabels,
	/// Text placed in the prompt when the interface opens.
	pub initial_query: String,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		print!("{}", summary::format_summary(self));
	}
}
