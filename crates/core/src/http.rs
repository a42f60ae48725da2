//! Minimal HTTP seam between the client logic and the network.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

/// A fully described outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
	pub method: Method,
	pub url: String,
	pub query: Vec<(String, String)>,
	pub headers: Vec<(&'static str, String)>,
	pub body: Option<Vec<u8>>,
	/// Deadline for the whole exchange; exceeding it fails the request.
	pub timeout: Duration,
}

impl HttpRequest {
	fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
		Self {
			method,
			url: url.into(),
			query: Vec::new(),
			headers: Vec::new(),
			body: None,
			timeout,
		}
	}

	pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
		Self::new(Method::Get, url, timeout)
	}

	pub fn post(url: impl Into<String>, timeout: Duration) -> Self {
		Self::new(Method::Post, url, timeout)
	}

	#[must_use]
	pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));
		self
	}

	#[must_use]
	pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));
		self
	}

	#[must_use]
	pub fn body(mut self, body: Vec<u8>) -> Self {
		self.body = Some(body);
		self
	}

	/// Look up a header value by case-insensitive name.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn query_value(&self, name: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}

/// Status code and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
	pub status: u16,
	pub body: String,
}

impl HttpReply {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	#[must_use]
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
	#[error("request timed out after {0:?}")]
	TimedOut(Duration),
	#[error("network error: {0}")]
	Network(String),
}

/// Executes requests. Implementations must be shareable across the per-request
/// worker threads.
pub trait HttpBackend: Send + Sync {
	fn execute(&self, request: &HttpRequest) -> Result<HttpReply, TransportError>;
}

/// Blocking backend built on `ureq`.
///
/// Non-2xx statuses are returned as replies rather than errors so callers can
/// tell a rejected login apart from an unreachable server.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqBackend;

impl HttpBackend for UreqBackend {
	fn execute(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
		let config = ureq::Agent::config_builder()
			.timeout_global(Some(request.timeout))
			.http_status_as_error(false)
			.build();
		let agent = ureq::Agent::new_with_config(config);
		let map_err = |err: ureq::Error| match err {
			ureq::Error::Timeout(_) => TransportError::TimedOut(request.timeout),
			other => TransportError::Network(other.to_string()),
		};

		let result = match request.method {
			Method::Get => {
				let mut builder = agent.get(&request.url);
				for (name, value) in &request.headers {
					builder = builder.header(*name, value);
				}
				for (name, value) in &request.query {
					builder = builder.query(name, value);
				}
				builder.call()
			}
			Method::Post => {
				let mut builder = agent.post(&request.url);
				for (name, value) in &request.headers {
					builder = builder.header(*name, value);
				}
				for (name, value) in &request.query {
					builder = builder.query(name, value);
				}
				match &request.body {
					Some(body) => builder.send(&body[..]),
					None => builder.send_empty(),
				}
			}
		};

		let mut response = result.map_err(&map_err)?;
		let status = response.status().as_u16();
		let body = response.body_mut().read_to_string().map_err(&map_err)?;
		Ok(HttpReply { status, body })
	}
}
