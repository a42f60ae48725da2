//! Core state container for the terminal front end.

use std::sync::mpsc::Receiver;

use indx_core::{
	Credentials, DatasetList, QueryConfiguration, SearchRecord, SearchResultView, SearchRuntime,
	Session,
};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

use crate::config::UiLabels;
use crate::input::QueryInput;
use crate::style::Theme;

/// What the user ended the session with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
	/// False when the user cancelled.
	pub accepted: bool,
	pub selection: Option<SearchRecord>,
	pub query: String,
}

/// Aggregate state shared across the terminal UI.
pub struct App<'a> {
	/// Text input widget for the query.
	pub search_input: QueryInput<'a>,
	pub(crate) ui: UiLabels,
	pub theme: Theme,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) search: SearchRuntime,
	pub(crate) table_state: TableState,
	pub(crate) credentials: Option<Credentials>,
	pub(crate) pending_login: Option<Receiver<Session>>,
	pub(crate) pending_datasets: Option<Receiver<DatasetList>>,
	/// One-off message shown in place of the session status.
	pub(crate) notice: Option<String>,
}

impl<'a> App<'a> {
	pub fn new(search: SearchRuntime, ui: UiLabels) -> Self {
		Self {
			search_input: QueryInput::default(),
			ui,
			theme: Theme::default(),
			throbber_state: ThrobberState::default(),
			search,
			table_state: TableState::default(),
			credentials: None,
			pending_login: None,
			pending_datasets: None,
			notice: None,
		}
	}

	/// Credentials used by the login key binding.
	#[must_use]
	pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
		self.credentials = credentials;
		self
	}

	#[must_use]
	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.search_input.set_text(query);
		self
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn view(&self) -> &SearchResultView {
		self.search.view()
	}

	#[must_use]
	pub fn config(&self) -> &QueryConfiguration {
		self.search.config()
	}

	#[must_use]
	pub fn session(&self) -> Session {
		self.search.session().session()
	}

	#[must_use]
	pub fn selected_index(&self) -> Option<usize> {
		self.table_state.selected()
	}

	pub(crate) fn current_selection(&self) -> Option<SearchRecord> {
		let index = self.table_state.selected()?;
		self.view().records().get(index).cloned()
	}

	/// Keep the selection inside the visible rows.
	pub(crate) fn ensure_selection(&mut self) {
		let len = self.view().len();
		match self.table_state.selected() {
			_ if len == 0 => self.table_state.select(None),
			Some(index) if index >= len => self.table_state.select(Some(len - 1)),
			None => self.table_state.select(Some(0)),
			Some(_) => {}
		}
	}

	pub(crate) fn move_selection_up(&mut self) {
		let len = self.view().len();
		if len == 0 {
			return;
		}
		let index = self.table_state.selected().unwrap_or(0);
		self.table_state.select(Some(index.saturating_sub(1)));
	}

	pub(crate) fn move_selection_down(&mut self) {
		let len = self.view().len();
		if len == 0 {
			return;
		}
		let index = self
			.table_state
			.selected()
			.map_or(0, |index| (index + 1).min(len - 1));
		self.table_state.select(Some(index));
	}
}
