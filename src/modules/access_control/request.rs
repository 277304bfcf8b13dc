//! Edge request and event envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{AccessControlError, AccessControlResult};

/// An already-parsed inbound request as the edge hands it to the gate.
///
/// Only the client address, path and query string are inspected. Every other
/// field (method, headers, origin, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    /// Client address, dotted-quad IPv4.
    #[serde(rename = "clientIp")]
    pub client_ip: String,

    /// Request path.
    #[serde(rename = "uri")]
    pub path: String,

    /// Raw query string, without the leading `?`.
    #[serde(rename = "querystring", default)]
    pub query: String,

    /// Remaining wire fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeRequest {
    /// Create a request with no extra fields.
    #[must_use]
    pub fn new(
        client_ip: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            client_ip: client_ip.into(),
            path: path.into(),
            query: query.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra wire field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Edge event envelope: `{"Records":[{"cf":{"request":{...}}}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEvent {
    /// Event records; the gate acts on the first.
    #[serde(rename = "Records")]
    pub records: Vec<EdgeRecord>,
}

/// A single event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Distribution payload.
    pub cf: EdgePayload,
}

/// Distribution payload carrying the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgePayload {
    /// The intercepted request.
    pub request: EdgeRequest,

    /// Other payload members (`config`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeEvent {
    /// Parse an event from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the JSON does not match the envelope.
    pub fn from_json(json: &str) -> AccessControlResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AccessControlError::MalformedInput(format!("edge event: {e}")))
    }

    /// Take the request out of the first record.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the event has no records.
    pub fn into_request(self) -> AccessControlResult<EdgeRequest> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.cf.request)
            .ok_or_else(|| AccessControlError::MalformedInput("edge event has no records".to_string()))
    }
}
