//! Visual styling for the search screen.

use ratatui::style::{Color, Modifier, Style};

/// Styles for the UI elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Header line and table header.
	pub header: Style,
	/// Selected result row.
	pub row_highlight: Style,
	pub prompt: Style,
	/// Placeholder, progress and empty-state text.
	pub empty: Style,
	/// Session status when authorized.
	pub highlight: Style,
	/// Session status after a failed login.
	pub error: Style,
	/// The row on the truncation boundary.
	pub last_confident: Style,
	/// Rows past the truncation boundary.
	pub below_confidence: Style,
}

impl Theme {
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	#[must_use]
	pub fn border_style(&self) -> Style {
		Style::default().fg(self.header.fg.unwrap_or(Color::Reset))
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
			row_highlight: Style::new().bg(Color::DarkGray),
			prompt: Style::new().fg(Color::Cyan),
			empty: Style::new().fg(Color::DarkGray),
			highlight: Style::new().fg(Color::Green),
			error: Style::new().fg(Color::Red),
			last_confident: Style::new().add_modifier(Modifier::UNDERLINED),
			below_confidence: Style::new().add_modifier(Modifier::DIM),
		}
	}
}
