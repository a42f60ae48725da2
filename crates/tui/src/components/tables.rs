use indx_core::{Confidence, SearchResultView};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
	Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState,
};

use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const TABLE_COLUMN_SPACING: u16 = 1;
/// Header row + separator height inside the table's viewport.
pub(crate) const TABLE_HEADER_ROWS: u16 = 2;

/// What the results pane needs from the application state.
pub struct ResultsPane<'a> {
	pub view: &'a SearchResultView,
	/// Adds the `key.segment` column.
	pub show_meta: bool,
	/// Title for the bordered block.
	pub title: Option<String>,
}

/// Render the result rows, annotating them against the truncation boundary.
pub fn render_results(
	frame: &mut Frame,
	area: Rect,
	table_state: &mut TableState,
	pane: ResultsPane<'_>,
	theme: &Theme,
) {
	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style());
	if let Some(title) = pane.title.clone() {
		block = block.title(title);
	}
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let mut headers = vec!["#", "Score", "Text"];
	let mut widths = vec![
		Constraint::Length(4),
		Constraint::Length(5),
		Constraint::Fill(1),
	];
	if pane.show_meta {
		headers.push("Key");
		widths.push(Constraint::Length(16));
	}

	let rows: Vec<Row<'_>> = pane
		.view
		.annotated()
		.enumerate()
		.map(|(index, (record, confidence))| {
			let mut cells = vec![
				Cell::from(format!("{}", index + 1)),
				Cell::from(record.metric_score.to_string()),
				Cell::from(record.document_text.clone()),
			];
			if pane.show_meta {
				cells.push(Cell::from(format!(
					"{}.{}",
					record.document_key, record.segment_number
				)));
			}
			Row::new(cells).style(confidence_style(confidence, theme))
		})
		.collect();

	let header = Row::new(headers.into_iter().map(Cell::from))
		.style(theme.header)
		.height(1)
		.bottom_margin(1);
	let table = Table::new(rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(HighlightSpacing::WhenSelected)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, inner, table_state);

	render_header_separator(frame, inner, theme);

	if pane.view.is_empty() {
		render_empty(frame, inner, theme);
	}
}

pub(crate) fn confidence_style(confidence: Confidence, theme: &Theme) -> Style {
	match confidence {
		Confidence::Confident => Style::default(),
		Confidence::LastConfident => theme.last_confident,
		Confidence::BelowConfidence => theme.below_confidence,
	}
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height <= 1 || area.width == 0 {
		return;
	}
	let sep_rect = Rect {
		y: area.y + 1,
		height: 1,
		..area
	};
	let width = area.width as usize;
	if width <= 2 {
		frame.render_widget(Paragraph::new(" ".repeat(width)), sep_rect);
		return;
	}

	let middle = Span::styled("─".repeat(width - 2), theme.border_style());
	let line = Line::from(vec![Span::raw(" "), middle, Span::raw(" ")]);
	frame.render_widget(Paragraph::new(Text::from(line)), sep_rect);
}

fn render_empty(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height <= TABLE_HEADER_ROWS {
		return;
	}
	let message_area = Rect {
		y: area.y + TABLE_HEADER_ROWS,
		height: area.height - TABLE_HEADER_ROWS,
		..area
	};
	let empty = Paragraph::new("No results")
		.alignment(Alignment::Center)
		.style(theme.empty_style());
	frame.render_widget(Clear, message_area);
	frame.render_widget(empty, message_area);
}
