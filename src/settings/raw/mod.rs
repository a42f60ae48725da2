use std::env;
use std::num::NonZeroU32;

use anyhow::{Error, Result};
use indx_search::{Algorithm, CoverageSettings, Credentials, ProtocolVersion, QueryConfiguration};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

mod coverage;
mod search;
mod server;
mod ui;

use coverage::CoverageSection;
use search::{KeyList, SearchSection, sanitize_keys};
use server::{AuthSection, ServerSection};
use ui::UiSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	server: ServerSection,
	search: SearchSection,
	coverage: CoverageSection,
	auth: AuthSection,
	ui: UiSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.server.apply_cli_overrides(cli);
		self.search.apply_cli_overrides(cli);
		self.auth.apply_cli_overrides(cli);
		self.ui.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			url: detect_source(
				cli.url.is_some(),
				self.server.url.is_some(),
				"INDX__SERVER__URL",
				"--url",
				"server.url",
			),
			protocol: detect_source(
				cli.protocol.is_some(),
				self.server.protocol.is_some(),
				"INDX__SERVER__PROTOCOL",
				"--protocol",
				"server.protocol",
			),
			dataset: detect_source(
				cli.dataset.is_some(),
				self.server.dataset.is_some(),
				"INDX__SERVER__DATASET",
				"--dataset",
				"server.dataset",
			),
			results: detect_source(
				cli.results.is_some(),
				self.search.results.is_some(),
				"INDX__SEARCH__RESULTS",
				"--results",
				"search.results",
			),
			algorithm: detect_source(
				cli.algorithm.is_some(),
				self.search.algorithm.is_some(),
				"INDX__SEARCH__ALGORITHM",
				"--algorithm",
				"search.algorithm",
			),
			score_min: detect_source(
				cli.score_min.is_some(),
				self.search.score_min.is_some(),
				"INDX__SEARCH__SCORE_MIN",
				"--score-min",
				"search.score_min",
			),
		};

		let defaults = QueryConfiguration::default();

		let protocol = match self.server.protocol {
			Some(value) => value.parse::<ProtocolVersion>().map_err(|err| {
				ConfigError::invalid(
					"server.protocol",
					value.clone(),
					sources.source_for_protocol(),
					err.to_string(),
				)
			})?,
			None => defaults.protocol,
		};

		let algorithm = match self.search.algorithm {
			Some(value) => parse_algorithm(&value).ok_or_else(|| {
				ConfigError::invalid(
					"search.algorithm",
					value.clone(),
					sources.source_for_algorithm(),
					"expected relevancy (0) or coverage (1)",
				)
			})?,
			None => defaults.algorithm,
		};

		let results_cap = match self.search.results {
			Some(value) => NonZeroU32::new(value).ok_or_else(|| {
				ConfigError::invalid(
					"search.results",
					value.to_string(),
					sources.source_for_results(),
					"must be greater than zero",
				)
			})?,
			None => defaults.results_cap,
		};

		let query = QueryConfiguration {
			endpoint: self.server.url.unwrap_or(defaults.endpoint),
			protocol,
			dataset: self
				.server
				.dataset
				.map(|dataset| dataset.trim().to_string())
				.unwrap_or(defaults.dataset),
			results_cap,
			algorithm,
			score_min: self.search.score_min.unwrap_or(defaults.score_min),
			truncate: self.search.truncate.unwrap_or(defaults.truncate),
			show_meta: self.ui.show_meta.unwrap_or(defaults.show_meta),
			remove_duplicates: self
				.search
				.remove_duplicates
				.unwrap_or(defaults.remove_duplicates),
			key_include_filter: sanitize_keys(self.search.key_include),
			key_exclude_filter: sanitize_keys(self.search.key_exclude),
			log_prefix: self.search.log_prefix.unwrap_or(defaults.log_prefix),
			coverage: CoverageSettings {
				lcs: self.coverage.lcs.resolve(),
				words: self.coverage.words.resolve(),
			},
		};

		let credentials = self
			.auth
			.username
			.map(|username| Credentials::new(username, self.auth.password.unwrap_or_default()));

		let config = ResolvedConfig {
			query,
			credentials,
			ui: self.ui.labels(),
			initial_query: self.ui.initial_query.unwrap_or_default(),
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn parse_algorithm(value: &str) -> Option<Algorithm> {
	match value.trim().to_ascii_lowercase().as_str() {
		"relevancy" | "0" => Some(Algorithm::Relevancy),
		"coverage" | "1" => Some(Algorithm::Coverage),
		_ => None,
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
