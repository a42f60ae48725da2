//! Scripted HTTP backend for exercising the client without a server.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use serde_json::json;

use crate::http::{HttpBackend, HttpReply, HttpRequest, TransportError};

/// One canned outcome, optionally delayed to force out-of-order completion.
#[derive(Debug, Clone)]
pub struct Scripted {
	pub outcome: Result<HttpReply, TransportError>,
	pub delay: Duration,
}

impl Scripted {
	pub fn reply(status: u16, body: impl Into<String>) -> Self {
		Self {
			outcome: Ok(HttpReply::new(status, body)),
			delay: Duration::ZERO,
		}
	}

	pub fn failure(error: TransportError) -> Self {
		Self {
			outcome: Err(error),
			delay: Duration::ZERO,
		}
	}

	#[must_use]
	pub fn after(self, delay: Duration) -> Self {
		Self { delay, ..self }
	}
}

type Handler = Box<dyn Fn(&HttpRequest) -> Scripted + Send + Sync>;

/// Replays queued replies in order, or answers through a handler closure.
///
/// Every request is recorded so tests can inspect headers and bodies.
#[derive(Default)]
pub struct ScriptedBackend {
	queue: Mutex<VecDeque<Scripted>>,
	handler: Option<Handler>,
	requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_fn(handler: impl Fn(&HttpRequest) -> Scripted + Send + Sync + 'static) -> Self {
		Self {
			handler: Some(Box::new(handler)),
			..Self::default()
		}
	}

	#[must_use]
	pub fn push(self, scripted: Scripted) -> Self {
		self.queue
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push_back(scripted);
		self
	}

	#[must_use]
	pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
		self.push(Scripted::reply(status, body))
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn request_count(&self) -> usize {
		self.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}

impl HttpBackend for ScriptedBackend {
	fn execute(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
		self.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(request.clone());
		let scripted = match &self.handler {
			Some(handler) => handler(request),
			None => self
				.queue
				.lock()
				.unwrap_or_else(PoisonError::into_inner)
				.pop_front()
				.unwrap_or_else(|| {
					Scripted::failure(TransportError::Network("no scripted reply left".into()))
				}),
		};
		if !scripted.delay.is_zero() {
			thread::sleep(scripted.delay);
		}
		scripted.outcome
	}
}

/// A search reply body holding `(score, text)` records keyed `k0`, `k1`, ...
pub fn search_body(records: &[(u16, &str)], bottom: Option<i64>) -> String {
	let records: Vec<_> = records
		.iter()
		.enumerate()
		.map(|(index, (score, text))| {
			json!({
				"metricScore": score,
				"documentTextToBeIndexed": text,
				"documentKey": format!("k{index}"),
				"segmentNumber": 0,
			})
		})
		.collect();
	let mut body = json!({ "searchRecords": records });
	if let Some(bottom) = bottom {
		body["coverageBottomIndex"] = json!(bottom);
	}
	body.to_string()
}
