use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin};

use super::App;
use crate::components::{
	HeaderContext, InputContext, ProgressState, ResultsPane, render_header, render_input,
	render_results,
};

impl App<'_> {
	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Min(1),
			])
			.split(area);

		let session = self.session();
		render_header(
			frame,
			layout[0],
			HeaderContext {
				labels: &self.ui,
				config: self.search.config(),
				session: &session,
				notice: self.notice.as_deref(),
				theme: &self.theme,
			},
		);

		let (progress_text, progress_complete) = self.progress_status();
		let placeholder = Some(self.ui.placeholder.as_str()).filter(|text| !text.is_empty());
		render_input(
			frame,
			InputContext {
				search_input: &self.search_input,
				placeholder,
				area: layout[1],
				theme: &self.theme,
			},
			ProgressState {
				progress_text: &progress_text,
				progress_complete,
				throbber_state: &self.throbber_state,
			},
		);

		let title = self
			.search
			.last_failure()
			.map(|err| format!(" {err} "));
		render_results(
			frame,
			layout[2],
			&mut self.table_state,
			ResultsPane {
				view: self.search.view(),
				show_meta: self.search.config().show_meta,
				title,
			},
			&self.theme,
		);
	}
}
