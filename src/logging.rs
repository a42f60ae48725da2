//! Diagnostic logging.
//!
//! The terminal belongs to the UI, so events go to `indx-search.log` in the
//! cache directory. `INDX_LOG` takes directives such as `indx::runtime=debug`;
//! without it the level passed by the caller applies.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

const LOG_ENV: &str = "INDX_LOG";
const LOG_FILE: &str = "indx-search.log";

/// Path of the log file inside the cache directory.
pub fn log_file() -> Result<PathBuf> {
	Ok(app_dirs::get_cache_dir()?.join(LOG_FILE))
}

fn build_env_filter(default_level: &str) -> EnvFilter {
	if let Ok(directives) = std::env::var(LOG_ENV)
		&& let Ok(filter) = EnvFilter::try_new(&directives)
	{
		return filter;
	}
	EnvFilter::new(default_level)
}

/// Install the global subscriber. Returns the log file path.
pub fn initialize(default_level: &str) -> Result<PathBuf> {
	let path = log_file()?;
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	tracing_subscriber::fmt()
		.with_env_filter(build_env_filter(default_level))
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
	Ok(path)
}
