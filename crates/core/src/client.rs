use std::sync::Arc;
use std::time::Duration;

use indx_protocol::{DatasetList, SEARCH_TIMEOUT_MS, SearchResponse};
use tracing::{debug, warn};

use crate::http::{HttpBackend, HttpRequest, UreqBackend};
use crate::{BearerToken, IndxError, QueryConfiguration, SearchResultView};

const DATASETS_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends search requests and post-processes the replies.
///
/// The client keeps no state between calls, so repeating a request is always
/// safe.
#[derive(Clone)]
pub struct SearchClient {
	backend: Arc<dyn HttpBackend>,
}

impl SearchClient {
	pub fn new(backend: Arc<dyn HttpBackend>) -> Self {
		Self { backend }
	}

	pub fn with_ureq() -> Self {
		Self::new(Arc::new(UreqBackend))
	}

	/// Run a search, degrading every failure to an empty view.
	pub fn search(
		&self,
		query: &str,
		config: &QueryConfiguration,
		token: &BearerToken,
	) -> SearchResultView {
		self.try_search(query, config, token).unwrap_or_else(|err| {
			warn!(target: "indx::search", %err, query, "search failed, showing no results");
			SearchResultView::empty()
		})
	}

	pub fn try_search(
		&self,
		query: &str,
		config: &QueryConfiguration,
		token: &BearerToken,
	) -> Result<SearchResultView, IndxError> {
		let body = config
			.build_request(query)
			.to_json()
			.map_err(|err| IndxError::SearchTransportFailure {
				status: None,
				reason: format!("could not encode request: {err}"),
			})?;
		let request = HttpRequest::post(
			config.search_url(),
			Duration::from_millis(u64::from(SEARCH_TIMEOUT_MS)),
		)
		.header("Accept", "application/json")
		.header("Authorization", token.as_header())
		.header("Content-Type", "application/json")
		.body(body);
		debug!(target: "indx::search", url = %request.url, query, "sending search");

		let reply = self
			.backend
			.execute(&request)
			.map_err(|err| IndxError::SearchTransportFailure {
				status: None,
				reason: err.to_string(),
			})?;
		if !reply.is_success() {
			return Err(IndxError::search_status(reply.status));
		}
		let response = SearchResponse::parse(&reply.body)
			.map_err(|err| IndxError::SearchMalformedResponse(err.to_string()))?;
		debug!(
			target: "indx::search",
			query,
			records = response.search_records.len(),
			bottom = ?response.coverage_bottom_index,
			"search answered"
		);
		Ok(SearchResultView::from_response(query, response, config))
	}

	/// Dataset identifiers visible to `token`; empty on any failure.
	pub fn datasets(&self, config: &QueryConfiguration, token: &BearerToken) -> DatasetList {
		self.try_datasets(config, token).unwrap_or_else(|err| {
			warn!(target: "indx::search", %err, "dataset listing failed");
			DatasetList::new()
		})
	}

	pub fn try_datasets(
		&self,
		config: &QueryConfiguration,
		token: &BearerToken,
	) -> Result<DatasetList, IndxError> {
		if !config.protocol.supports_dataset_listing() {
			debug!(
				target: "indx::search",
				protocol = %config.protocol,
				"dataset listing unsupported"
			);
			return Ok(DatasetList::new());
		}
		let request = HttpRequest::get(config.datasets_url(), DATASETS_TIMEOUT)
			.header("Accept", "application/json")
			.header("Authorization", token.as_header());
		let reply = self
			.backend
			.execute(&request)
			.map_err(|err| IndxError::SearchTransportFailure {
				status: None,
				reason: err.to_string(),
			})?;
		match reply.status {
			401 => Ok(DatasetList::new()),
			_ if reply.is_success() => serde_json::from_str(&reply.body)
				.map_err(|err| IndxError::SearchMalformedResponse(err.to_string())),
			status => Err(IndxError::search_status(status)),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Value;

	use super::*;
	use crate::http::TransportError;
	use crate::testing::{Scripted, ScriptedBackend, search_body};
	use crate::ProtocolVersion;

	fn client(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, SearchClient) {
		let backend = Arc::new(backend);
		(backend.clone(), SearchClient::new(backend))
	}

	#[test]
	fn search_sends_headers_and_body() {
		let body = search_body(&[(120, "Oslo"), (90, "Oslo S")], None);
		let (backend, client) = client(ScriptedBackend::new().reply(200, body));
		let config = QueryConfiguration::default().with_dataset("cities");

		let view = client.search("oslo", &config, &BearerToken::from_raw("tok"));

		assert_eq!(view.len(), 2);
		let request = &backend.requests()[0];
		assert_eq!(request.url, "https://api.indx.co/api/Search/cities");
		assert_eq!(request.timeout, Duration::from_millis(1000));
		assert_eq!(request.header_value("Accept"), Some("application/json"));
		assert_eq!(request.header_value("Content-Type"), Some("application/json"));
		assert_eq!(request.header_value("Authorization"), Some("Bearer tok"));
		let body = request.body.as_deref().expect("body");
		let sent: Value = serde_json::from_slice(body).expect("json");
		assert_eq!(sent["queryText"], "oslo");
		assert_eq!(sent["maxNumberOfRecordsToReturn"], 30);
	}

	#[test]
	fn empty_token_is_still_sent() {
		let (backend, client) = client(ScriptedBackend::new().reply(200, search_body(&[], None)));
		client.search("x", &QueryConfiguration::default(), &BearerToken::empty());
		assert_eq!(backend.requests()[0].header_value("Authorization"), Some(""));
	}

	#[test]
	fn malformed_reply_yields_empty_view() {
		let (_, client) = client(
			ScriptedBackend::new()
				.reply(200, r#"{"records":[]}"#)
				.reply(200, "<html>"),
		);
		let config = QueryConfiguration::default();
		let token = BearerToken::empty();

		assert!(matches!(
			client.try_search("abc", &config, &token),
			Err(IndxError::SearchMalformedResponse(_))
		));
		assert!(client.search("abc", &config, &token).is_empty());
	}

	#[test]
	fn failures_map_to_transport_errors() {
		let (_, client) = client(
			ScriptedBackend::new()
				.reply(503, "")
				.push(Scripted::failure(TransportError::TimedOut(Duration::from_millis(1000)))),
		);
		let config = QueryConfiguration::default();
		let token = BearerToken::empty();

		let err = client.try_search("abc", &config, &token).expect_err("503");
		assert_eq!(err, IndxError::search_status(503));
		let err = client.try_search("abc", &config, &token).expect_err("timeout");
		assert!(matches!(err, IndxError::SearchTransportFailure { status: None, .. }));
	}

	#[test]
	fn datasets_follow_protocol_and_auth() {
		let (backend, client) = client(
			ScriptedBackend::new()
				.reply(200, r#"["books","films"]"#)
				.reply(401, ""),
		);
		let token = BearerToken::from_raw("t");
		let config = QueryConfiguration::default();

		assert_eq!(client.datasets(&config, &token), ["books", "films"]);
		assert!(client.datasets(&config, &token).is_empty());

		let legacy = QueryConfiguration {
			protocol: ProtocolVersion::V3_2,
			..QueryConfiguration::default()
		};
		assert!(client.datasets(&legacy, &token).is_empty());
		assert_eq!(backend.request_count(), 2);
		assert_eq!(backend.requests()[0].url, "https://api.indx.co/api/Search/datasets");
	}
}
