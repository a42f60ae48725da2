use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, SearchOutcome};

impl App<'_> {
	/// Process a keyboard event and return an outcome if the user exits.
	pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => return Some(self.outcome(false)),
			KeyCode::Char('c') if ctrl => return Some(self.outcome(false)),
			KeyCode::Enter => return Some(self.outcome(true)),
			KeyCode::Char('l') if ctrl => self.start_login(),
			KeyCode::Char('o') if ctrl => self.logout(),
			KeyCode::Char('t') if ctrl => self.toggle_truncation(),
			KeyCode::Char('k') if ctrl => self.toggle_meta(),
			KeyCode::Char('d') if ctrl => self.cycle_dataset(),
			KeyCode::Up => self.move_selection_up(),
			KeyCode::Down => self.move_selection_down(),
			_ => {
				if self.search_input.input(key) {
					self.request_search();
				}
			}
		}
		None
	}

	fn outcome(&self, accepted: bool) -> SearchOutcome {
		SearchOutcome {
			accepted,
			selection: if accepted {
				self.current_selection()
			} else {
				None
			},
			query: self.search_input.text().to_string(),
		}
	}
}
