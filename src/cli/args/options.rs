use clap::ValueEnum;

/// Ranking strategies accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AlgorithmArg {
	Relevancy,
	Coverage,
}

impl AlgorithmArg {
	/// Return the identifier consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			AlgorithmArg::Relevancy => "relevancy",
			AlgorithmArg::Coverage => "coverage",
		}
	}
}

/// Log levels selectable from the CLI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
