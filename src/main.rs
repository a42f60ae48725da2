mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, Report, parse_cli, print_json, print_plain};
use indx_search::{Session, logging};
use settings::ResolvedConfig;
use tracing::{debug, warn};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	let resolved = settings::load(&cli)?;

	match logging::initialize(cli.log_level.as_str()) {
		Ok(path) => debug!(target: "indx::main", log = %path.display(), "logging initialised"),
		Err(err) => eprintln!("warning: logging disabled: {err:#}"),
	}

	if cli.print_config {
		resolved.print_summary();
	}

	let report = run(&cli, resolved)?;

	match cli.output {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}

/// Pick the front end requested on the command line and run it to completion.
fn run(cli: &CliArgs, settings: ResolvedConfig) -> Result<Report> {
	let workflow = SearchWorkflow::from_config(settings);

	if cli.list_datasets {
		report_login(workflow.login_if_configured());
		return Ok(Report::Datasets(workflow.list_datasets()));
	}

	if let Some(query) = &cli.query {
		report_login(workflow.login_if_configured());
		return Ok(Report::Results(workflow.run_query(query)));
	}

	Ok(Report::Selection(workflow.run_interactive()?))
}

fn report_login(session: Option<Session>) {
	if let Some(session) = session
		&& !session.status.is_authorized()
	{
		warn!(target: "indx::main", status = %session.message(), "continuing without a token");
		eprintln!("{}", session.message());
	}
}
