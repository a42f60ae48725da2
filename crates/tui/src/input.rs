//! Single-line query editor.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// Wraps a [`TextArea`] constrained to one line of query text.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> QueryInput<'a> {
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Feed a key to the editor. Returns true if the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		// Newlines would split the query across lines.
		if matches!(key.code, KeyCode::Enter)
			|| (key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL))
		{
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(key);
		self.text() != before
	}

	pub fn set_text(&mut self, text: impl Into<String>) {
		*self = Self::new(text);
	}

	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}

impl Default for QueryInput<'_> {
	fn default() -> Self {
		Self::new(String::new())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_reports_changes() {
		let mut input = QueryInput::default();
		assert!(input.input(key(KeyCode::Char('o'))));
		assert!(input.input(key(KeyCode::Char('s'))));
		assert_eq!(input.text(), "os");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "o");
	}

	#[test]
	fn cursor_moves_are_not_changes() {
		let mut input = QueryInput::new("oslo");
		assert!(!input.input(key(KeyCode::Left)));
		assert!(!input.input(key(KeyCode::Enter)));
		assert_eq!(input.text(), "oslo");
	}
}
