use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::input::QueryInput;
use crate::style::Theme;

/// Argument bundle for rendering the prompt row.
pub struct InputContext<'a> {
	pub search_input: &'a QueryInput<'a>,
	/// Placeholder text shown when input is empty.
	pub placeholder: Option<&'a str>,
	pub area: Rect,
	pub theme: &'a Theme,
}

/// Progress information shown at the right edge of the prompt.
pub struct ProgressState<'a> {
	pub progress_text: &'a str,
	/// False while a request is in flight; the spinner is drawn then.
	pub progress_complete: bool,
	pub throbber_state: &'a ThrobberState,
}

/// Render the input row with optional placeholder and progress.
pub fn render_input(
	frame: &mut ratatui::Frame,
	input: InputContext<'_>,
	progress: ProgressState<'_>,
) {
	let InputContext {
		search_input,
		placeholder,
		area,
		theme,
	} = input;
	if area.width <= 2 || area.height == 0 {
		return;
	}

	frame
		.buffer_mut()
		.set_span(area.left(), area.top(), &Span::styled("> ", theme.prompt), 2);
	let input_area = Rect {
		x: area.x + 2,
		width: area.width - 2,
		..area
	};
	search_input.render_textarea(frame, input_area);

	if search_input.text().is_empty()
		&& let Some(placeholder_text) = placeholder
	{
		render_placeholder(frame, input_area, placeholder_text, theme);
	}

	render_progress(frame, input_area, progress, theme);
}

fn render_placeholder(frame: &mut ratatui::Frame, area: Rect, text: &str, theme: &Theme) {
	if area.width == 0 || text.is_empty() {
		return;
	}
	// Leave the cursor cell alone.
	let x = area.left().saturating_add(1);
	let available_width = area.width.saturating_sub(1) as usize;
	let display_text: String = text.chars().take(available_width).collect();
	frame.buffer_mut().set_line(
		x,
		area.top(),
		&Line::from(Span::styled(display_text, theme.empty_style())),
		area.width.saturating_sub(1),
	);
}

fn render_progress(
	frame: &mut ratatui::Frame,
	area: Rect,
	progress: ProgressState<'_>,
	theme: &Theme,
) {
	let ProgressState {
		progress_text,
		progress_complete,
		throbber_state,
	} = progress;
	if area.width == 0 || progress_text.is_empty() {
		return;
	}

	let muted_style = theme.empty_style();
	let mut line = Line::default();
	if !progress_complete {
		let spinner = Throbber::default()
			.style(muted_style)
			.throbber_style(muted_style);
		line.spans.push(spinner.to_symbol_span(throbber_state));
	}
	line.spans
		.push(Span::styled(progress_text.to_string(), muted_style));

	let line_width = u16::try_from(line.width()).unwrap_or(u16::MAX);
	if line_width == 0 {
		return;
	}

	let buffer = frame.buffer_mut();
	let mut start_x = area.right().saturating_sub(line_width).max(area.left());

	// Keep a gap after whatever the user typed.
	let row = area.top();
	let last_char_x = (area.left()..area.right())
		.filter(|x| {
			buffer
				.cell((*x, row))
				.is_some_and(|cell| !cell.symbol().trim().is_empty())
		})
		.last();
	if let Some(last_x) = last_char_x {
		start_x = start_x.max(last_x.saturating_add(3));
	}
	if start_x >= area.right() {
		return;
	}

	let max_width = area.right().saturating_sub(start_x).min(line_width);
	buffer.set_line(start_x, row, &line, max_width);
}
