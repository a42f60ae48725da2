use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use indx_core::testing::{Scripted, ScriptedBackend, search_body};
use indx_core::{
	AuthStatus, Credentials, QueryConfiguration, SearchClient, SearchRuntime, SessionManager,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Modifier;

use crate::{App, UiLabels};

const WAIT: Duration = Duration::from_secs(5);

fn scripted_server() -> ScriptedBackend {
	ScriptedBackend::from_fn(|request| {
		if request.url.ends_with("/Login") {
			return Scripted::reply(200, r#"{"token":"t"}"#);
		}
		Scripted::reply(
			200,
			search_body(&[(210, "first hit"), (180, "second hit"), (90, "third hit")], Some(0)),
		)
	})
}

fn app_with(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, App<'static>) {
	let backend = Arc::new(backend);
	let session = Arc::new(SessionManager::new(backend.clone(), "https://api.example.test/api/"));
	let runtime = SearchRuntime::new(
		SearchClient::new(backend.clone()),
		session,
		QueryConfiguration::default(),
	);
	(backend, App::new(runtime, UiLabels::default()))
}

fn key(code: KeyCode) -> KeyEvent {
	KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
	KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App<'_>, text: &str) {
	for c in text.chars() {
		assert!(app.handle_key(key(KeyCode::Char(c))).is_none());
	}
}

fn settle(app: &mut App<'_>) {
	assert!(app.search.wait_for_latest(WAIT), "search did not finish");
	app.ensure_selection();
}

fn draw(app: &mut App<'_>) -> Terminal<TestBackend> {
	let mut terminal = Terminal::new(TestBackend::new(90, 12)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");
	terminal
}

fn screen(app: &mut App<'_>) -> String {
	draw(app).backend().to_string()
}

fn row_modifiers(terminal: &Terminal<TestBackend>, needle: &str) -> Modifier {
	let buffer = terminal.backend().buffer();
	let area = buffer.area;
	for y in area.top()..area.bottom() {
		let line: String = (area.left()..area.right())
			.filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
			.collect();
		if line.contains(needle) {
			return buffer
				.cell((area.left() + 4, y))
				.map(|cell| cell.modifier)
				.unwrap_or_else(Modifier::empty);
		}
	}
	panic!("no row containing {needle:?}");
}

#[test]
fn empty_prompt_shows_placeholder_and_header() {
	let (_, mut app) = app_with(scripted_server());
	let screen = screen(&mut app);
	assert!(screen.contains("INDX SEARCH SYSTEM"));
	assert!(screen.contains("My search demo"));
	assert!(screen.contains("Not logged in"));
	assert!(screen.contains("Type here to search"));
	assert!(screen.contains("No results"));
}

#[test]
fn typing_renders_annotated_results() {
	let (backend, mut app) = app_with(scripted_server());
	type_text(&mut app, "os");
	settle(&mut app);

	assert_eq!(backend.request_count(), 2);
	let terminal = draw(&mut app);
	let screen = terminal.backend().to_string();
	assert!(screen.contains("first hit"));
	assert!(screen.contains("3 results"));
	assert!(!screen.contains("No results"));

	assert!(row_modifiers(&terminal, "first hit").contains(Modifier::UNDERLINED));
	assert!(row_modifiers(&terminal, "second hit").contains(Modifier::DIM));
	assert!(row_modifiers(&terminal, "third hit").contains(Modifier::DIM));
}

#[test]
fn toggling_truncation_reissues_and_clears_annotation() {
	let (backend, mut app) = app_with(scripted_server());
	type_text(&mut app, "os");
	settle(&mut app);

	assert!(app.handle_key(ctrl('t')).is_none());
	settle(&mut app);

	assert!(!app.config().truncate);
	assert_eq!(backend.request_count(), 3);
	assert_eq!(app.view().truncation_index(), -1);
	let terminal = draw(&mut app);
	assert!(!row_modifiers(&terminal, "second hit").contains(Modifier::DIM));
}

#[test]
fn metadata_toggle_adds_key_column() {
	let (_, mut app) = app_with(scripted_server());
	type_text(&mut app, "os");
	settle(&mut app);
	assert!(!screen(&mut app).contains("k0.0"));

	app.handle_key(ctrl('k'));
	settle(&mut app);

	let screen = screen(&mut app);
	assert!(app.config().show_meta);
	assert!(screen.contains("k0.0"));
	assert!(screen.contains("Dataset: 0"));
}

#[test]
fn enter_accepts_selection_and_escape_cancels() {
	let (_, mut app) = app_with(scripted_server());
	type_text(&mut app, "os");
	settle(&mut app);
	app.handle_key(key(KeyCode::Down));
	assert_eq!(app.selected_index(), Some(1));

	let outcome = app.handle_key(key(KeyCode::Enter)).expect("accepted");
	assert!(outcome.accepted);
	assert_eq!(outcome.query, "os");
	assert_eq!(
		outcome.selection.map(|record| record.document_text),
		Some("second hit".to_string())
	);

	let outcome = app.handle_key(key(KeyCode::Esc)).expect("cancelled");
	assert!(!outcome.accepted);
	assert!(outcome.selection.is_none());
}

#[test]
fn login_without_credentials_shows_notice() {
	let (backend, mut app) = app_with(scripted_server());
	app.handle_key(ctrl('l'));
	assert!(screen(&mut app).contains("No credentials configured"));
	assert_eq!(backend.request_count(), 0);
}

#[test]
fn login_and_logout_update_status() {
	let (_, app) = app_with(scripted_server());
	let mut app = app.with_credentials(Some(Credentials::new("ada@example.test", "pw")));

	app.handle_key(ctrl('l'));
	let deadline = Instant::now() + WAIT;
	while app.pending_login.is_some() && Instant::now() < deadline {
		app.pump_login();
		thread::sleep(Duration::from_millis(10));
	}

	assert_eq!(app.session().status, AuthStatus::Authorized);
	assert!(screen(&mut app).contains("Authorized"));

	app.handle_key(ctrl('o'));
	assert_eq!(app.session().status, AuthStatus::LoggedOut);
	assert!(screen(&mut app).contains("Not logged in"));
}

#[test]
fn failed_search_keeps_prompt_usable() {
	let (_, mut app) = app_with(ScriptedBackend::from_fn(|_| Scripted::reply(500, "")));
	type_text(&mut app, "os");
	settle(&mut app);

	let screen = screen(&mut app);
	assert!(screen.contains("No results"));
	assert!(screen.contains("search failed"));

	type_text(&mut app, "l");
	assert_eq!(app.search_input.text(), "osl");
}

fn dataset_server(datasets: &'static str) -> ScriptedBackend {
	ScriptedBackend::from_fn(move |request| {
		if request.url.ends_with("/Search/datasets") {
			return Scripted::reply(200, datasets);
		}
		Scripted::reply(200, search_body(&[(210, "first hit")], None))
	})
}

fn wait_for_datasets(app: &mut App<'_>) {
	let deadline = Instant::now() + WAIT;
	while app.pending_datasets.is_some() && Instant::now() < deadline {
		app.pump_datasets();
		thread::sleep(Duration::from_millis(10));
	}
	assert!(app.pending_datasets.is_none(), "dataset listing did not finish");
}

fn last_url(backend: &ScriptedBackend) -> Option<String> {
	backend.requests().last().map(|request| request.url.clone())
}

#[test]
fn dataset_key_switches_dataset_and_searches_again() {
	let (backend, mut app) = app_with(dataset_server(r#"["books","films"]"#));
	type_text(&mut app, "os");
	settle(&mut app);
	assert_eq!(
		last_url(&backend).as_deref(),
		Some("https://api.indx.co/api/Search/0")
	);

	app.handle_key(ctrl('d'));
	wait_for_datasets(&mut app);
	settle(&mut app);

	assert_eq!(app.config().dataset, "books");
	assert_eq!(
		last_url(&backend).as_deref(),
		Some("https://api.indx.co/api/Search/books")
	);

	app.handle_key(ctrl('d'));
	wait_for_datasets(&mut app);
	settle(&mut app);
	type_text(&mut app, "l");
	settle(&mut app);

	assert_eq!(app.config().dataset, "films");
	assert_eq!(
		last_url(&backend).as_deref(),
		Some("https://api.indx.co/api/Search/films")
	);
}

#[test]
fn empty_dataset_list_keeps_current_dataset() {
	let (_, mut app) = app_with(dataset_server("[]"));
	app.handle_key(ctrl('d'));
	wait_for_datasets(&mut app);

	assert_eq!(app.config().dataset, "0");
	assert!(screen(&mut app).contains("No datasets available"));
}
