use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{
	BearerToken, IndxError, QueryConfiguration, SearchClient, SearchResultView, SessionManager,
};

/// Result of one background search, tagged with its sequence number.
#[derive(Debug)]
pub struct SearchCompletion {
	pub id: u64,
	pub query: String,
	/// Token the request was sent with.
	pub token: BearerToken,
	pub outcome: Result<SearchResultView, IndxError>,
}

/// Holds the view of the most recently issued query that has completed.
#[derive(Debug, Default)]
pub struct ViewSlot {
	accepted: Option<u64>,
	query: String,
	view: SearchResultView,
}

impl ViewSlot {
	/// Store `view` if `id` is the latest issued sequence number.
	pub fn offer(&mut self, latest: u64, id: u64, query: String, view: SearchResultView) -> bool {
		if id != latest || self.accepted.is_some_and(|accepted| accepted >= id) {
			return false;
		}
		self.accepted = Some(id);
		self.query = query;
		self.view = view;
		true
	}

	#[must_use]
	pub fn accepted(&self) -> Option<u64> {
		self.accepted
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn view(&self) -> &SearchResultView {
		&self.view
	}
}

/// Issues one background request per query and applies completions in
/// last-issued-wins order.
pub struct SearchRuntime {
	client: SearchClient,
	session: Arc<SessionManager>,
	config: Arc<QueryConfiguration>,
	tx: Sender<SearchCompletion>,
	rx: Receiver<SearchCompletion>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	in_flight: bool,
	slot: ViewSlot,
	last_failure: Option<IndxError>,
}

impl SearchRuntime {
	pub fn new(
		client: SearchClient,
		session: Arc<SessionManager>,
		config: QueryConfiguration,
	) -> Self {
		let (tx, rx) = mpsc::channel();
		Self {
			client,
			session,
			config: Arc::new(config),
			tx,
			rx,
			next_query_id: 0,
			current_query_id: None,
			in_flight: false,
			slot: ViewSlot::default(),
			last_failure: None,
		}
	}

	/// Start a search for `query` and return its sequence number.
	pub fn issue(&mut self, query: impl Into<String>) -> u64 {
		let query = query.into();
		let id = self.begin();

		let client = self.client.clone();
		let config = Arc::clone(&self.config);
		let token = self.session.token();
		let tx = self.tx.clone();
		let sent_query = query.clone();
		debug!(target: "indx::runtime", id, query = %query, "issuing search");

		let spawned = thread::Builder::new()
			.name(format!("indx-search-{id}"))
			.spawn(move || {
				let outcome = client.try_search(&sent_query, &config, &token);
				let _ = tx.send(SearchCompletion {
					id,
					query: sent_query,
					token,
					outcome,
				});
			});
		if let Err(err) = spawned {
			warn!(target: "indx::runtime", id, %err, "could not start search thread");
			self.fail_issued(
				id,
				query,
				IndxError::SearchTransportFailure {
					status: None,
					reason: err.to_string(),
				},
			);
		}
		id
	}

	/// Allocate the next sequence number and mark it as the one in flight.
	fn begin(&mut self) -> u64 {
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.current_query_id = Some(id);
		self.in_flight = true;
		id
	}

	/// Settle the latest issued search locally with an empty view.
	fn fail_issued(&mut self, id: u64, query: String, err: IndxError) {
		self.in_flight = false;
		self.last_failure = Some(err);
		self.slot.offer(id, id, query, SearchResultView::empty());
	}

	/// Apply every completion that has arrived. Returns true when the visible
	/// view changed.
	pub fn pump(&mut self) -> bool {
		let mut changed = false;
		loop {
			match self.rx.try_recv() {
				Ok(completion) => changed |= self.apply(completion),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		changed
	}

	/// Block until the latest issued search has been applied or `timeout`
	/// elapses. Returns true if nothing is left in flight.
	pub fn wait_for_latest(&mut self, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		while self.in_flight {
			let remaining = deadline.saturating_duration_since(Instant::now());
			match self.rx.recv_timeout(remaining) {
				Ok(completion) => {
					self.apply(completion);
				}
				Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
			}
		}
		!self.in_flight
	}

	fn apply(&mut self, completion: SearchCompletion) -> bool {
		let SearchCompletion {
			id,
			query,
			token,
			outcome,
		} = completion;

		if outcome.as_ref().is_err_and(IndxError::is_unauthorized) {
			self.session.forget_token(&token);
		}
		if !self.matches_latest(id) {
			debug!(
				target: "indx::runtime",
				id,
				latest = ?self.current_query_id,
				"discarding stale completion"
			);
			return false;
		}

		self.in_flight = false;
		let view = match outcome {
			Ok(view) => {
				self.last_failure = None;
				view
			}
			Err(err) => {
				warn!(target: "indx::runtime", id, %err, "search failed, showing no results");
				self.last_failure = Some(err);
				SearchResultView::empty()
			}
		};
		self.slot.offer(self.next_query_id, id, query, view)
	}

	#[must_use]
	pub fn matches_latest(&self, id: u64) -> bool {
		Some(id) == self.current_query_id
	}

	/// Replace the configuration used by subsequent searches.
	pub fn set_config(&mut self, config: QueryConfiguration) {
		self.config = Arc::new(config);
	}

	#[must_use]
	pub fn config(&self) -> &QueryConfiguration {
		&self.config
	}

	#[must_use]
	pub fn view(&self) -> &SearchResultView {
		self.slot.view()
	}

	/// Query text the visible view was computed for.
	#[must_use]
	pub fn visible_query(&self) -> &str {
		self.slot.query()
	}

	#[must_use]
	pub fn last_failure(&self) -> Option<&IndxError> {
		self.last_failure.as_ref()
	}

	#[must_use]
	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	#[must_use]
	pub fn has_issued_query(&self) -> bool {
		self.current_query_id.is_some()
	}

	#[must_use]
	pub fn session(&self) -> &Arc<SessionManager> {
		&self.session
	}

	#[must_use]
	pub fn client(&self) -> &SearchClient {
		&self.client
	}
}
