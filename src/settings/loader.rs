use anyhow::{Result, anyhow};
use config::Map;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_with_env(cli, None)
}

/// Same as [`load`], reading `INDX__*` variables from `vars` instead of the
/// process environment when given.
pub(crate) fn load_with_env(
	cli: &CliArgs,
	vars: Option<Map<String, String>>,
) -> Result<ResolvedConfig> {
	let builder = build_config(cli, vars)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use indx_search::ProtocolVersion;
	use tempfile::tempdir;

	use super::*;

	const FILE: &str = r#"
[server]
url = "http://localhost:5000/api/"
protocol = "3.2"
dataset = "heap-1"

[search]
results = 12
score_min = 80
truncate = false
key_include = ["doc-1", "doc-2"]

[coverage.lcs]
error_tolerance = 2

[ui]
placeholder = "Find a book"
initial_query = "tolkien"
"#;

	fn isolated() -> Option<Map<String, String>> {
		Some(Map::new())
	}

	fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
		Some(
			vars.iter()
				.map(|(key, value)| (key.to_string(), value.to_string()))
				.collect(),
		)
	}

	#[test]
	fn config_file_values_are_resolved() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("custom.toml");
		fs::write(&path, FILE).expect("write config");
		let path = path.to_string_lossy().into_owned();

		let cli = CliArgs::parse_from(["indx-search", "--no-config", "-c", path.as_str()]);
		let resolved = load_with_env(&cli, isolated()).expect("loads");

		assert_eq!(resolved.query.endpoint, "http://localhost:5000/api/");
		assert_eq!(resolved.query.protocol, ProtocolVersion::V3_2);
		assert_eq!(resolved.query.dataset, "heap-1");
		assert_eq!(resolved.query.results_cap.get(), 12);
		assert_eq!(resolved.query.score_min, 80);
		assert!(!resolved.query.truncate);
		assert_eq!(
			resolved.query.key_include_filter,
			Some(vec!["doc-1".to_string(), "doc-2".to_string()])
		);
		assert_eq!(resolved.query.coverage.lcs.lcs_error_tolerance, 2);
		assert_eq!(resolved.ui.placeholder, "Find a book");
		assert_eq!(resolved.initial_query, "tolkien");
	}

	#[test]
	fn cli_flags_override_config_file() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("custom.toml");
		fs::write(&path, FILE).expect("write config");
		let path = path.to_string_lossy().into_owned();

		let cli = CliArgs::parse_from([
			"indx-search",
			"--no-config",
			"-c",
			path.as_str(),
			"-r",
			"3",
			"--protocol",
			"3.3",
		]);
		let resolved = load_with_env(&cli, isolated()).expect("loads");

		assert_eq!(resolved.query.results_cap.get(), 3);
		assert_eq!(resolved.query.protocol, ProtocolVersion::V3_3);
		assert_eq!(resolved.query.dataset, "heap-1");
	}

	#[test]
	fn missing_explicit_config_file_is_an_error() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("absent.toml");
		let path = path.to_string_lossy().into_owned();

		let cli = CliArgs::parse_from(["indx-search", "--no-config", "-c", path.as_str()]);
		assert!(load_with_env(&cli, isolated()).is_err());
	}

	#[test]
	fn environment_values_keep_their_text() {
		let cli = CliArgs::parse_from(["indx-search", "--no-config"]);
		let vars = env(&[
			("INDX__SERVER__DATASET", "007"),
			("INDX__AUTH__USERNAME", "ada"),
			("INDX__AUTH__PASSWORD", "0012"),
			("INDX__SEARCH__RESULTS", "5"),
			("INDX__SEARCH__TRUNCATE", "false"),
			("INDX__SEARCH__KEY_INCLUDE", "a, b"),
			("INDX__UI__INITIAL_QUERY", "1984"),
		]);
		let resolved = load_with_env(&cli, vars).expect("loads");

		assert_eq!(resolved.query.dataset, "007");
		let credentials = resolved.credentials.expect("credentials");
		assert_eq!(credentials.password, "0012");
		assert_eq!(resolved.query.results_cap.get(), 5);
		assert!(!resolved.query.truncate);
		assert_eq!(
			resolved.query.key_include_filter,
			Some(vec!["a".to_string(), "b".to_string()])
		);
		assert_eq!(resolved.initial_query, "1984");
	}

	#[test]
	fn environment_overrides_config_file() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("custom.toml");
		fs::write(&path, FILE).expect("write config");
		let path = path.to_string_lossy().into_owned();

		let cli = CliArgs::parse_from(["indx-search", "--no-config", "-c", path.as_str()]);
		let vars = env(&[("INDX__SERVER__DATASET", "0042")]);
		let resolved = load_with_env(&cli, vars).expect("loads");

		assert_eq!(resolved.query.dataset, "0042");
		assert_eq!(resolved.query.results_cap.get(), 12);
	}
}
