use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indx_core::{HttpBackend, UreqBackend};
use indx_search::{
	App, SearchClient, SearchOutcome, SearchResultView, SearchRuntime, Session, SessionManager,
};
use tracing::{info, warn};

use crate::settings::ResolvedConfig;

/// Upper bound on how long a one-shot search waits for its reply.
const ONE_SHOT_WAIT: Duration = Duration::from_secs(5);

/// Result of a single non-interactive search.
#[derive(Debug)]
pub(crate) struct QueryReport {
	pub(crate) query: String,
	pub(crate) view: SearchResultView,
	pub(crate) failure: Option<String>,
	pub(crate) session: Session,
	pub(crate) show_meta: bool,
}

/// Coordinates the session, the search runtime and the chosen front end.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
	runtime: SearchRuntime,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self::with_backend(config, Arc::new(UreqBackend))
	}

	fn with_backend(config: ResolvedConfig, backend: Arc<dyn HttpBackend>) -> Self {
		let session = Arc::new(SessionManager::new(
			Arc::clone(&backend),
			config.query.endpoint.clone(),
		));
		let client = SearchClient::new(backend);
		let runtime = SearchRuntime::new(client, session, config.query.clone());
		Self { config, runtime }
	}

	fn session(&self) -> &Arc<SessionManager> {
		self.runtime.session()
	}

	/// Log in with the configured credentials, blocking until the exchange
	/// finishes. Does nothing for anonymous use.
	pub(crate) fn login_if_configured(&self) -> Option<Session> {
		let credentials = self.config.credentials.as_ref()?;
		let session = self
			.session()
			.login(credentials.username.clone(), credentials.password.clone());
		if session.status.is_authorized() {
			info!(target: "indx::workflow", user = %credentials.username, "logged in");
		} else {
			warn!(target: "indx::workflow", status = %session.message(), "login did not authorize");
		}
		Some(session)
	}

	/// Run one search and wait for its reply.
	pub(crate) fn run_query(mut self, query: &str) -> QueryReport {
		self.runtime.issue(query);
		if !self.runtime.wait_for_latest(ONE_SHOT_WAIT) {
			warn!(target: "indx::workflow", query, "search did not finish in time");
		}
		QueryReport {
			query: query.to_string(),
			view: self.runtime.view().clone(),
			failure: self.runtime.last_failure().map(ToString::to_string),
			session: self.session().session(),
			show_meta: self.config.query.show_meta,
		}
	}

	/// Datasets the current token may search.
	pub(crate) fn list_datasets(&self) -> Vec<String> {
		let token = self.session().token();
		self.runtime.client().datasets(&self.config.query, &token)
	}

	/// Hand control to the terminal interface. The login, if any, runs in the
	/// background so the status line shows it progressing.
	pub(crate) fn run_interactive(self) -> Result<SearchOutcome> {
		let Self { config, runtime } = self;
		let login = config.credentials.is_some();
		let mut app = App::new(runtime, config.ui)
			.with_credentials(config.credentials)
			.with_initial_query(config.initial_query);
		if login {
			app.start_login();
		}
		app.run()
	}
}
