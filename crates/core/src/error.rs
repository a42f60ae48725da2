use thiserror::Error;

/// Failures surfaced by the session manager and the search client.
///
/// Auth failures change the visible session status; search failures are
/// recovered locally by showing an empty result list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndxError {
	#[error("unauthorized, check credentials")]
	AuthUnauthorized,

	#[error("bad request")]
	AuthBadRequest,

	#[error("login request failed: {0}")]
	AuthTransportFailure(String),

	#[error("search request failed{}: {reason}", status_suffix(.status))]
	SearchTransportFailure { status: Option<u16>, reason: String },

	#[error("malformed search response: {0}")]
	SearchMalformedResponse(String),

	#[error("invalid configuration for {field}: {reason}")]
	InvalidConfiguration { field: &'static str, reason: String },
}

impl IndxError {
	pub(crate) fn search_status(status: u16) -> Self {
		Self::SearchTransportFailure {
			status: Some(status),
			reason: "unexpected response status".to_string(),
		}
	}

	pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidConfiguration {
			field,
			reason: reason.into(),
		}
	}

	/// Whether the server rejected the bearer credential.
	#[must_use]
	pub fn is_unauthorized(&self) -> bool {
		matches!(
			self,
			Self::AuthUnauthorized
				| Self::SearchTransportFailure {
					status: Some(401),
					..
				}
		)
	}
}

fn status_suffix(status: &Option<u16>) -> String {
	status
		.map(|status| format!(" (HTTP {status})"))
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transport_message_mentions_status() {
		let err = IndxError::search_status(503);
		assert_eq!(
			err.to_string(),
			"search request failed (HTTP 503): unexpected response status"
		);

		let err = IndxError::SearchTransportFailure {
			status: None,
			reason: "connection refused".into(),
		};
		assert_eq!(err.to_string(), "search request failed: connection refused");
	}

	#[test]
	fn unauthorized_detection() {
		assert!(IndxError::AuthUnauthorized.is_unauthorized());
		assert!(IndxError::search_status(401).is_unauthorized());
		assert!(!IndxError::search_status(500).is_unauthorized());
		assert!(!IndxError::AuthBadRequest.is_unauthorized());
	}
}
