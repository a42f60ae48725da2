use serde::Deserialize;

use crate::cli::CliArgs;

/// Where to reach the API and which heap or dataset to search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ServerSection {
	pub(super) url: Option<String>,
	pub(super) protocol: Option<String>,
	pub(super) dataset: Option<String>,
}

impl ServerSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(url) = cli.url.clone() {
			self.url = Some(url);
		}
		if let Some(protocol) = cli.protocol {
			self.protocol = Some(protocol.as_str().to_string());
		}
		if let Some(dataset) = cli.dataset.clone() {
			self.dataset = Some(dataset);
		}
	}
}

/// Account used for the login exchange.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct AuthSection {
	pub(super) username: Option<String>,
	pub(super) password: Option<String>,
}

impl AuthSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(user) = cli.user.clone() {
			self.username = Some(user);
		}
		if let Some(password) = cli.password.clone() {
			self.password = Some(password);
		}
	}
}
