use std::fmt::Write;

use indx_search::ProtocolVersion;

use super::ResolvedConfig;

const MASK: &str = "********";

pub(super) fn format_summary(config: &ResolvedConfig) -> String {
	let query = &config.query;
	let mut out = String::new();
	let _ = writeln!(out, "Effective configuration:");
	let _ = writeln!(out, "  Endpoint: {}", query.endpoint);
	let _ = writeln!(out, "  Protocol: {}", query.protocol);
	let _ = writeln!(out, "  Dataset: {}", query.dataset);
	let _ = writeln!(out, "  Results: {}", query.results_cap);
	let _ = writeln!(out, "  Algorithm: {}", query.algorithm);
	let _ = writeln!(out, "  Minimum score: {}", query.score_min);
	let _ = writeln!(out, "  Truncate: {}", bool_to_word(query.truncate));
	let _ = writeln!(
		out,
		"  Remove duplicates: {}",
		bool_to_word(query.remove_duplicates)
	);
	let _ = writeln!(out, "  Show meta: {}", bool_to_word(query.show_meta));
	let _ = writeln!(
		out,
		"  Key include filter: {}",
		list_or_none(query.key_include_filter.as_deref())
	);
	let _ = writeln!(
		out,
		"  Key exclude filter: {}",
		list_or_none(query.key_exclude_filter.as_deref())
	);
	if !query.log_prefix.is_empty() {
		let _ = writeln!(out, "  Log prefix: {}", query.log_prefix);
	}
	let coverage = match query.protocol {
		ProtocolVersion::V3_2 => serde_json::to_string(&query.coverage.lcs),
		ProtocolVersion::V3_3 => serde_json::to_string(&query.coverage.words),
	};
	if let Ok(coverage) = coverage {
		let _ = writeln!(out, "  Coverage: {coverage}");
	}
	match &config.credentials {
		Some(credentials) => {
			let _ = writeln!(out, "  User: {}", credentials.username);
			let password = if credentials.password.is_empty() {
				"(empty)"
			} else {
				MASK
			};
			let _ = writeln!(out, "  Password: {password}");
		}
		None => {
			let _ = writeln!(out, "  User: (anonymous)");
		}
	}
	let _ = writeln!(out, "  Placeholder: {}", config.ui.placeholder);
	let _ = writeln!(
		out,
		"  Dataset description: {}",
		config.ui.dataset_description
	);
	if !config.initial_query.is_empty() {
		let _ = writeln!(out, "  Initial query: {}", config.initial_query);
	}
	out
}

fn list_or_none(values: Option<&[String]>) -> String {
	match values {
		Some(values) if !values.is_empty() => values.join(", "),
		_ => "(none)".to_string(),
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use indx_search::{Credentials, QueryConfiguration, UiLabels};

	use super::*;

	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(super::bool_to_word(true), "yes");
		assert_eq!(super::bool_to_word(false), "no");
	}

	#[test]
	fn summary_masks_password() {
		let config = ResolvedConfig {
			query: QueryConfiguration {
				key_include_filter: Some(vec!["a".into(), "b".into()]),
				..QueryConfiguration::default()
			},
			credentials: Some(Credentials::new("me@example.com", "hunter2")),
			ui: UiLabels::default(),
			initial_query: "harry".into(),
		};

		let summary = format_summary(&config);
		assert!(summary.starts_with("Effective configuration:"));
		assert!(summary.contains("  User: me@example.com"));
		assert!(summary.contains("  Password: ********"));
		assert!(!summary.contains("hunter2"));
		assert!(summary.contains("  Key include filter: a, b"));
		assert!(summary.contains("  Key exclude filter: (none)"));
		assert!(summary.contains("\"coverageDepth\":500"));
		assert!(summary.contains("  Initial query: harry"));
	}
}
