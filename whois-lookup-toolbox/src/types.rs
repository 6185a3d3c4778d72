//! Public types returned by toolbox operations.

use std::time::Duration;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use url::Url;

/// Default APIVerve WHOIS endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.apiverve.com/v1/whoislookup";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder key shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Settings for [`WhoisClient`](crate::WhoisClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Value sent in the `x-api-key` header.
    pub api_key: String,
    /// Lookup endpoint; the domain is appended as the `domain` query parameter.
    pub endpoint: Url,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("whois-lookup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parsed [`DEFAULT_ENDPOINT`].
pub fn default_endpoint() -> Url {
    // The constant is a valid absolute URL.
    #[allow(clippy::expect_used)]
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

/// WHOIS lookup result with the registration fields the API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisResult {
    /// The normalized domain that was queried.
    pub domain: String,
    /// Domain registrar (e.g. "MarkMonitor Inc.").
    pub registrar: Option<String>,
    /// Registration creation date, as returned by the API.
    pub created_date: Option<String>,
    /// Registration expiry date.
    pub expiry_date: Option<String>,
    /// Last updated date.
    pub updated_date: Option<String>,
    /// EPP status codes.
    pub status: Vec<String>,
    /// Authoritative name servers.
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<Contact>,
}

/// A WHOIS contact block.
///
/// Registries either return a structured object or a single free-text line
/// (often a privacy notice).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    /// Non-empty members of a JSON object, in response order.
    Details(Vec<(String, String)>),
    /// Free-text contact.
    Text(String),
}

impl Contact {
    /// Build a contact from a raw JSON value.
    ///
    /// Returns `None` for `null`, empty strings, `false` and objects with no
    /// non-empty members.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let fields: Vec<(String, String)> = map
                    .iter()
                    .filter_map(|(key, value)| value_text(value).map(|text| (key.clone(), text)))
                    .collect();
                (!fields.is_empty()).then_some(Self::Details(fields))
            }
            other => value_text(other).map(Self::Text),
        }
    }
}

impl Serialize for Contact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Details(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Render a JSON value as display text, or `None` when it carries nothing.
///
/// Numbers and `true` are stringified, arrays are joined with `", "`, nested
/// objects are kept as compact JSON.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value.to_string()),
    }
}
