use clap::{CommandFactory, FromArgMatches, Parser};
use indx_core::ProtocolVersion;

use super::options::{AlgorithmArg, LogLevel};
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
	assert!(CliArgs::command().get_about().is_some());
}

#[test]
fn parse_cli_accepts_default_arguments() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["indx-search"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert_eq!(parsed.log_level, LogLevel::Warn);
	assert!(parsed.query.is_none());
	assert!(parsed.truncate.is_none());
}

#[test]
fn search_flags_parse() {
	let parsed = CliArgs::try_parse_from([
		"indx-search",
		"--protocol",
		"3.2",
		"-d",
		"books",
		"-r",
		"10",
		"--score-min",
		"120",
		"--truncate",
		"off",
		"--algorithm",
		"relevancy",
		"-q",
		"harry potter",
		"-o",
		"json",
	])
	.expect("parses");

	assert_eq!(parsed.protocol, Some(ProtocolVersion::V3_2));
	assert_eq!(parsed.dataset.as_deref(), Some("books"));
	assert_eq!(parsed.results, Some(10));
	assert_eq!(parsed.score_min, Some(120));
	assert_eq!(parsed.truncate, Some(false));
	assert_eq!(parsed.algorithm, Some(AlgorithmArg::Relevancy));
	assert_eq!(parsed.query.as_deref(), Some("harry potter"));
	assert_eq!(parsed.output, OutputFormat::Json);
}

#[test]
fn unknown_protocol_is_rejected() {
	assert!(CliArgs::try_parse_from(["indx-search", "--protocol", "4.0"]).is_err());
}
