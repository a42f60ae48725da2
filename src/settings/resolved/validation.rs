use super::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

const MAX_SCORE: u16 = 255;

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let query = &config.query;

	let endpoint = query.endpoint.trim();
	if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
		return Err(ConfigError::invalid(
			"server.url",
			query.endpoint.clone(),
			sources.source_for_url(),
			"must be an http or https URL",
		));
	}

	if query.dataset.trim().is_empty() {
		return Err(ConfigError::invalid(
			"server.dataset",
			query.dataset.clone(),
			sources.source_for_dataset(),
			"must not be empty",
		));
	}

	if query.score_min > MAX_SCORE {
		return Err(ConfigError::invalid(
			"search.score_min",
			query.score_min.to_string(),
			sources.source_for_score_min(),
			format!("must be between 0 and {MAX_SCORE}"),
		));
	}

	if let Some((field, value)) = query.coverage.lcs.invalid_tolerance() {
		return Err(ConfigError::invalid(
			"coverage.lcs",
			value.to_string(),
			SettingSource::ConfigKey("coverage.lcs"),
			format!("{field} must be a non-negative number"),
		));
	}

	if let Some(credentials) = &config.credentials
		&& credentials.username.trim().is_empty()
	{
		return Err(ConfigError::invalid(
			"auth.username",
			credentials.username.clone(),
			SettingSource::ConfigKey("auth.username"),
			"must not be blank",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use indx_search::{Credentials, QueryConfiguration, UiLabels};

	use super::*;

	fn config(query: QueryConfiguration) -> ResolvedConfig {
		ResolvedConfig {
			query,
			credentials: None,
			ui: UiLabels::default(),
			initial_query: String::new(),
		}
	}

	#[test]
	fn defaults_are_valid() {
		let config = config(QueryConfiguration::default());
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_score_above_scale() {
		let config = config(QueryConfiguration {
			score_min: 300,
			..QueryConfiguration::default()
		});
		let sources = ConfigSources {
			score_min: Some(SettingSource::CliFlag("--score-min")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "search.score_min");
		let message = err.to_string();
		assert!(message.contains("value: 300"));
		assert!(message.contains("CLI flag `--score-min`"));
	}

	#[test]
	fn validation_rejects_non_http_endpoint() {
		let config = config(QueryConfiguration {
			endpoint: "ftp://example.com/".into(),
			..QueryConfiguration::default()
		});
		let sources = ConfigSources {
			url: Some(SettingSource::Environment("INDX__SERVER__URL")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "server.url");
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn validation_rejects_negative_coverage_fraction() {
		let mut query = QueryConfiguration::default();
		query.coverage.lcs.coverage_min_word_hits_relative = -1.0;
		let err = validate(&config(query), &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "coverage.lcs");
		assert!(err.reason.contains("coverage_min_word_hits_relative"));
	}

	#[test]
	fn validation_rejects_blank_username() {
		let mut config = config(QueryConfiguration::default());
		config.credentials = Some(Credentials::new("  ", "secret"));
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "auth.username");
		assert!(err.to_string().contains("configuration key `auth.username`"));
	}
}
