//! Search issuance, completion pumping and session actions.

use std::sync::{Arc, mpsc};
use std::thread;

use indx_core::{AuthStatus, DatasetList};
use tracing::{debug, warn};

use super::App;

impl App<'_> {
	/// Issue a search for the current input text.
	pub(crate) fn request_search(&mut self) {
		let query = self.search_input.text().to_string();
		self.search.issue(query);
	}

	/// Search for the initial query, if one was supplied.
	pub(crate) fn hydrate_initial_results(&mut self) {
		if !self.search.has_issued_query() && !self.search_input.text().is_empty() {
			self.request_search();
		}
	}

	/// Apply finished searches. Returns true if the visible rows changed.
	pub fn pump_search_results(&mut self) -> bool {
		let changed = self.search.pump();
		if changed {
			self.ensure_selection();
		}
		changed
	}

	/// Collect a finished background login and refresh results with the new
	/// token.
	pub fn pump_login(&mut self) {
		let Some(rx) = &self.pending_login else {
			return;
		};
		match rx.try_recv() {
			Ok(session) => {
				self.pending_login = None;
				let has_query = !self.search_input.text().is_empty();
				if session.status == AuthStatus::Authorized && has_query {
					self.request_search();
				}
			}
			Err(mpsc::TryRecvError::Empty) => {}
			Err(mpsc::TryRecvError::Disconnected) => self.pending_login = None,
		}
	}

	/// Log in with the configured credentials on a background thread.
	pub fn start_login(&mut self) {
		let Some(credentials) = self.credentials.clone() else {
			self.notice = Some("No credentials configured".to_string());
			return;
		};
		self.notice = None;
		let session = Arc::clone(self.search.session());
		let (tx, rx) = mpsc::channel();
		let spawned = thread::Builder::new()
			.name("indx-login".to_string())
			.spawn(move || {
				let _ = tx.send(session.login(credentials.username, credentials.password));
			});
		match spawned {
			Ok(_) => self.pending_login = Some(rx),
			Err(err) => {
				warn!(target: "indx::session", %err, "could not start login thread");
				self.notice = Some(format!("Login failed: {err}"));
			}
		}
	}

	pub(crate) fn logout(&mut self) {
		self.notice = None;
		self.pending_login = None;
		self.search.session().logout();
	}

	pub(crate) fn toggle_truncation(&mut self) {
		let config = self.search.config().clone();
		let truncate = !config.truncate;
		debug!(target: "indx::runtime", truncate, "toggled truncation");
		self.search.set_config(config.with_truncate(truncate));
		self.request_search();
	}

	pub(crate) fn toggle_meta(&mut self) {
		let config = self.search.config().clone();
		let show_meta = !config.show_meta;
		self.search.set_config(config.with_show_meta(show_meta));
		self.request_search();
	}

	/// Fetch the dataset list on a background thread; [`App::pump_datasets`]
	/// switches to the next entry once it arrives.
	pub(crate) fn cycle_dataset(&mut self) {
		if self.pending_datasets.is_some() {
			return;
		}
		let client = self.search.client().clone();
		let config = self.search.config().clone();
		let token = self.search.session().token();
		let (tx, rx) = mpsc::channel();
		let spawned = thread::Builder::new()
			.name("indx-datasets".to_string())
			.spawn(move || {
				let _ = tx.send(client.datasets(&config, &token));
			});
		match spawned {
			Ok(_) => self.pending_datasets = Some(rx),
			Err(err) => {
				warn!(target: "indx::search", %err, "could not start dataset listing thread");
				self.notice = Some(format!("Dataset listing failed: {err}"));
			}
		}
	}

	/// Switch to the dataset after the current one once the listing arrives.
	pub fn pump_datasets(&mut self) {
		let Some(rx) = &self.pending_datasets else {
			return;
		};
		match rx.try_recv() {
			Ok(datasets) => {
				self.pending_datasets = None;
				self.switch_dataset(&datasets);
			}
			Err(mpsc::TryRecvError::Empty) => {}
			Err(mpsc::TryRecvError::Disconnected) => self.pending_datasets = None,
		}
	}

	fn switch_dataset(&mut self, datasets: &DatasetList) {
		let config = self.search.config().clone();
		let Some(next) = next_dataset(datasets, &config.dataset) else {
			self.notice = Some("No datasets available".to_string());
			return;
		};
		debug!(target: "indx::search", dataset = %next, "switched dataset");
		self.notice = None;
		self.search.set_config(config.with_dataset(next.clone()));
		self.request_search();
	}

	pub(crate) fn progress_status(&self) -> (String, bool) {
		if self.search.is_in_flight() {
			return ("searching".to_string(), false);
		}
		if self.pending_login.is_some() {
			return ("logging in".to_string(), false);
		}
		if self.pending_datasets.is_some() {
			return ("loading datasets".to_string(), false);
		}
		if self.search.last_failure().is_some() {
			return ("search failed".to_string(), true);
		}
		if !self.search.has_issued_query() {
			return (String::new(), true);
		}
		let count = self.view().len();
		let noun = if count == 1 { "result" } else { "results" };
		(format!("{count} {noun}"), true)
	}
}

/// The entry after `current`, wrapping around; the first entry when `current`
/// is not listed.
fn next_dataset<'d>(datasets: &'d [String], current: &str) -> Option<&'d String> {
	let next = datasets
		.iter()
		.position(|dataset| dataset == current)
		.map_or(0, |index| (index + 1) % datasets.len());
	datasets.get(next)
}

#[cfg(test)]
mod tests {
	use super::next_dataset;

	#[test]
	fn next_dataset_wraps_and_falls_back_to_first() {
		let datasets = vec!["books".to_string(), "films".to_string()];
		assert_eq!(next_dataset(&datasets, "0").map(String::as_str), Some("books"));
		assert_eq!(next_dataset(&datasets, "books").map(String::as_str), Some("films"));
		assert_eq!(next_dataset(&datasets, "films").map(String::as_str), Some("books"));
		assert_eq!(next_dataset(&[], "books"), None);
	}
}
