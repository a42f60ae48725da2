use indx_core::{AuthStatus, QueryConfiguration, Session};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::config::UiLabels;
use crate::style::Theme;

const SEPARATOR: &str = " · ";

/// Title, dataset details and login status on a single row.
pub struct HeaderContext<'a> {
	pub labels: &'a UiLabels,
	pub config: &'a QueryConfiguration,
	pub session: &'a Session,
	/// Transient message that replaces the session status.
	pub notice: Option<&'a str>,
	pub theme: &'a Theme,
}

pub fn render_header(frame: &mut Frame, area: Rect, header: HeaderContext<'_>) {
	if area.width == 0 || area.height == 0 {
		return;
	}
	let HeaderContext {
		labels,
		config,
		session,
		notice,
		theme,
	} = header;

	let mut left = vec![Span::styled(labels.title.clone(), theme.header)];
	if !labels.dataset_description.is_empty() {
		left.push(Span::raw(SEPARATOR));
		left.push(Span::raw(labels.dataset_description.clone()));
	}
	if config.show_meta {
		for detail in meta_details(config) {
			left.push(Span::styled(SEPARATOR, theme.empty_style()));
			left.push(Span::styled(detail, theme.empty_style()));
		}
	}

	let status = match notice {
		Some(notice) => Span::styled(notice.to_string(), theme.empty_style()),
		None => Span::styled(session.message(), status_style(session.status, theme)),
	};
	let status_width = u16::try_from(status.content.width()).unwrap_or(u16::MAX);

	let buffer = frame.buffer_mut();
	let left_width = area.width.saturating_sub(status_width.saturating_add(1));
	buffer.set_line(area.left(), area.top(), &Line::from(left), left_width);
	if status_width < area.width {
		let x = area.right() - status_width;
		buffer.set_span(x, area.top(), &status, status_width);
	}
}

fn meta_details(config: &QueryConfiguration) -> [String; 4] {
	[
		format!("Protocol: {}", config.protocol),
		format!("Dataset: {}", config.dataset),
		format!("Algorithm: {}", config.algorithm),
		format!("Url: {}", config.endpoint),
	]
}

fn status_style(status: AuthStatus, theme: &Theme) -> Style {
	match status {
		AuthStatus::Authorized => theme.highlight,
		AuthStatus::LoggedOut | AuthStatus::Authorizing => theme.empty_style(),
		AuthStatus::Unauthorized | AuthStatus::BadRequest | AuthStatus::TransportFailure => {
			theme.error
		}
	}
}
