use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};
use indx_core::ProtocolVersion;

use super::options::{AlgorithmArg, LogLevel, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `indx-search` binary.
#[derive(Parser, Debug)]
#[command(
	name = "indx-search",
	version,
	long_version = long_version(),
	about = "Search-as-you-type client for the INDX full-text search API",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "INDX_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long,
		value_name = "URL",
		help = "Base URL of the search API (default: https://api.indx.co/api/)"
	)]
	pub(crate) url: Option<String>,
	#[arg(
		long,
		value_name = "VERSION",
		help = "Server protocol revision, 3.2 or 3.3 (default: 3.3)"
	)]
	pub(crate) protocol: Option<ProtocolVersion>,
	#[arg(
		short = 'd',
		long,
		value_name = "ID",
		help = "Heap or dataset to search (default: 0)"
	)]
	pub(crate) dataset: Option<String>,
	#[arg(
		short = 'r',
		long,
		value_name = "NUM",
		help = "Maximum number of records to return (default: 30)"
	)]
	pub(crate) results: Option<u32>,
	#[arg(
		long = "score-min",
		value_name = "SCORE",
		help = "Hide records scoring below this for queries longer than one character (default: 30)"
	)]
	pub(crate) score_min: Option<u16>,
	#[arg(
		long,
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		help = "Mark records past the server's confidence boundary (default: enabled)"
	)]
	pub(crate) truncate: Option<bool>,
	#[arg(
		long = "remove-duplicates",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		help = "Ask the server to drop duplicate records (default: enabled)"
	)]
	pub(crate) remove_duplicates: Option<bool>,
	#[arg(
		long,
		value_enum,
		help = "Ranking strategy (default: coverage)"
	)]
	pub(crate) algorithm: Option<AlgorithmArg>,
	#[arg(
		long = "show-meta",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		help = "Show dataset details and record keys (default: disabled)"
	)]
	pub(crate) show_meta: Option<bool>,
	#[arg(
		short = 'u',
		long = "user",
		value_name = "EMAIL",
		env = "INDX_USER",
		help = "Account used to log in before searching (default: none)"
	)]
	pub(crate) user: Option<String>,
	#[arg(
		long,
		value_name = "PASSWORD",
		env = "INDX_PASSWORD",
		hide_env_values = true,
		help = "Password for --user (default: none)"
	)]
	pub(crate) password: Option<String>,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Run a single search, print the results and exit (default: interactive)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		long = "list-datasets",
		help = "Print the datasets visible to the account and exit (default: disabled)"
	)]
	pub(crate) list_datasets: bool,
	#[arg(
		long = "log-level",
		value_enum,
		default_value_t = LogLevel::Warn,
		help = "Level written to the log file unless INDX_LOG is set"
	)]
	pub(crate) log_level: LogLevel,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result (default: plain)"
	)]
	pub(crate) output: OutputFormat,
}
