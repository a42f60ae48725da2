//! Authentication lifecycle and ownership of the bearer token.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use indx_protocol::LoginResponse;
use tracing::{debug, info, warn};

use crate::http::{HttpBackend, HttpRequest, UreqBackend};
use crate::query::join_url;
use crate::IndxError;

const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// The `Authorization` header value, including its `Bearer ` prefix.
///
/// Empty until a login succeeds. Requests still carry an empty value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
	/// Wrap a raw token returned by the login endpoint.
	pub fn from_raw(token: &str) -> Self {
		Self(format!("Bearer {token}"))
	}

	#[must_use]
	pub fn empty() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn as_header(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for BearerToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			f.write_str("BearerToken(<empty>)")
		} else {
			f.write_str("BearerToken(<redacted>)")
		}
	}
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
		}
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthStatus {
	#[default]
	LoggedOut,
	Authorizing,
	Authorized,
	Unauthorized,
	BadRequest,
	/// The auth endpoint could not be reached or answered unexpectedly.
	TransportFailure,
}

impl AuthStatus {
	#[must_use]
	pub const fn label(self) -> &'static str {
		match self {
			Self::LoggedOut => "Not logged in",
			Self::Authorizing => "Authorizing...",
			Self::Authorized => "Authorized",
			Self::Unauthorized => "Unauthorized. Check credentials",
			Self::BadRequest => "Bad request",
			Self::TransportFailure => "Login failed",
		}
	}

	#[must_use]
	pub const fn is_authorized(self) -> bool {
		matches!(self, Self::Authorized)
	}

	fn from_error(error: &IndxError) -> Self {
		match error {
			IndxError::AuthUnauthorized => Self::Unauthorized,
			IndxError::AuthBadRequest => Self::BadRequest,
			_ => Self::TransportFailure,
		}
	}
}

impl fmt::Display for AuthStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
	pub username: Option<String>,
	pub status: AuthStatus,
	pub token: BearerToken,
	/// Detail for `TransportFailure`.
	pub failure: Option<String>,
}

impl Session {
	/// Human readable status line.
	#[must_use]
	pub fn message(&self) -> String {
		match (&self.status, &self.failure) {
			(AuthStatus::TransportFailure, Some(reason)) => format!("Login failed: {reason}"),
			(status, _) => status.label().to_string(),
		}
	}
}

#[derive(Debug, Default)]
struct SessionState {
	generation: u64,
	credentials: Option<Credentials>,
	status: AuthStatus,
	token: BearerToken,
	failure: Option<String>,
}

impl SessionState {
	fn snapshot(&self) -> Session {
		Session {
			username: self
				.credentials
				.as_ref()
				.map(|credentials| credentials.username.clone()),
			status: self.status,
			token: self.token.clone(),
			failure: self.failure.clone(),
		}
	}
}

/// Owns the single session and the shared bearer token.
///
/// Every `login` and `logout` starts a new generation. A login reply that
/// arrives after its generation was superseded is dropped, so a stale token
/// is never installed.
pub struct SessionManager {
	backend: Arc<dyn HttpBackend>,
	endpoint: String,
	timeout: Duration,
	state: RwLock<SessionState>,
}

impl SessionManager {
	pub fn new(backend: Arc<dyn HttpBackend>, endpoint: impl Into<String>) -> Self {
		Self {
			backend,
			endpoint: endpoint.into(),
			timeout: LOGIN_TIMEOUT,
			state: RwLock::new(SessionState::default()),
		}
	}

	pub fn with_ureq(endpoint: impl Into<String>) -> Self {
		Self::new(Arc::new(UreqBackend), endpoint)
	}

	#[must_use]
	pub fn with_timeout(self, timeout: Duration) -> Self {
		Self { timeout, ..self }
	}

	fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
		self.state.write().unwrap_or_else(PoisonError::into_inner)
	}

	fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
		let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
		f(&state)
	}

	/// Exchange credentials for a token. Supersedes any login in flight.
	pub fn login(&self, username: impl Into<String>, password: impl Into<String>) -> Session {
		let credentials = Credentials::new(username, password);
		let (generation, current) = {
			let mut state = self.write();
			state.generation = state.generation.wrapping_add(1);
			state.credentials = Some(credentials.clone());
			state.status = AuthStatus::Authorizing;
			state.failure = None;
			(state.generation, state.token.clone())
		};
		debug!(target: "indx::session", user = %credentials.username, generation, "login started");

		let outcome = self.exchange(&credentials, &current);

		let mut state = self.write();
		if state.generation != generation {
			debug!(
				target: "indx::session",
				generation,
				current = state.generation,
				"discarding superseded login reply"
			);
			return state.snapshot();
		}
		match outcome {
			Ok(token) => {
				state.token = token;
				state.status = AuthStatus::Authorized;
				info!(target: "indx::session", user = %credentials.username, "authorized");
			}
			Err(err) => {
				state.token = BearerToken::empty();
				state.status = AuthStatus::from_error(&err);
				if state.status == AuthStatus::TransportFailure {
					state.failure = Some(err.to_string());
				}
				warn!(target: "indx::session", user = %credentials.username, %err, "login failed");
			}
		}
		state.snapshot()
	}

	/// Log in again with the last credentials, if any were given.
	pub fn relogin(&self) -> Option<Session> {
		let credentials = self.read(|state| state.credentials.clone())?;
		Some(self.login(credentials.username, credentials.password))
	}

	/// Drop credentials and token. Any login still in flight is discarded.
	pub fn logout(&self) -> Session {
		let mut state = self.write();
		let generation = state.generation.wrapping_add(1);
		*state = SessionState {
			generation,
			..SessionState::default()
		};
		info!(target: "indx::session", "logged out");
		state.snapshot()
	}

	/// Clear `rejected` after the server refused it on a search call.
	///
	/// Returns false when a different token has been installed meanwhile.
	pub fn forget_token(&self, rejected: &BearerToken) -> bool {
		let mut state = self.write();
		if rejected.is_empty() || state.token != *rejected {
			return false;
		}
		state.token = BearerToken::empty();
		state.status = AuthStatus::Unauthorized;
		state.failure = None;
		warn!(target: "indx::session", "search rejected the bearer token");
		true
	}

	/// Snapshot of the current token, taken under the lock.
	pub fn token(&self) -> BearerToken {
		self.read(|state| state.token.clone())
	}

	pub fn status(&self) -> AuthStatus {
		self.read(|state| state.status)
	}

	pub fn session(&self) -> Session {
		self.read(SessionState::snapshot)
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	fn exchange(
		&self,
		credentials: &Credentials,
		current: &BearerToken,
	) -> Result<BearerToken, IndxError> {
		let request = HttpRequest::post(join_url(&self.endpoint, "Login"), self.timeout)
			.query("userEmail", &credentials.username)
			.query("userPassWord", &credentials.password)
			.header("Authorization", current.as_header())
			.header("Accept", "text/plain");
		let reply = self
			.backend
			.execute(&request)
			.map_err(|err| IndxError::AuthTransportFailure(err.to_string()))?;

		match reply.status {
			401 => Err(IndxError::AuthUnauthorized),
			400 => Err(IndxError::AuthBadRequest),
			_ if reply.is_success() => LoginResponse::parse(&reply.body)
				.map(|response| BearerToken::from_raw(&response.token))
				.map_err(|err| {
					IndxError::AuthTransportFailure(format!("unreadable login reply: {err}"))
				}),
			status => Err(IndxError::AuthTransportFailure(format!(
				"unexpected status {status}"
			))),
		}
	}
}

impl fmt::Debug for SessionManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionManager")
			.field("endpoint", &self.endpoint)
			.field("status", &self.status())
			.finish_non_exhaustive()
	}
}
