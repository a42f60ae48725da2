use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Successful reply from the `Login` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
	pub token: String,
	/// Anything else the server includes (expiry, user id, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl LoginResponse {
	pub fn parse(body: &str) -> serde_json::Result<Self> {
		serde_json::from_str(body)
	}
}

/// Reply from `Search/datasets`: the identifiers a caller may query.
pub type DatasetList = Vec<String>;
