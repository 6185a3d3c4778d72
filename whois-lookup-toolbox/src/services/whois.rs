//! APIVerve WHOIS client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{WhoisLookup, normalize_domain};
use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{ClientConfig, Contact, PLACEHOLDER_API_KEY, WhoisResult, value_text};
use crate::utils::truncate_for_log;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Fallback message when the API reports failure without an `error` field.
const DEFAULT_API_ERROR: &str = "WHOIS lookup failed";

/// Envelope returned by every APIVerve endpoint.
#[derive(Deserialize)]
struct ApiEnvelope {
    status: Option<String>,
    error: Option<String>,
    data: Option<Value>,
}

/// The `data` member of a successful WHOIS response.
///
/// Fields are kept as raw values: registries disagree on whether `status`
/// is a string or a list, and contacts may be objects or plain text.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct WhoisData {
    registrar: Option<Value>,
    created_date: Option<Value>,
    expiry_date: Option<Value>,
    updated_date: Option<Value>,
    status: Option<Value>,
    nameservers: Option<Value>,
    registrant: Option<Value>,
    admin: Option<Value>,
    tech: Option<Value>,
}

/// HTTP client for the WHOIS lookup API.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl WhoisClient {
    /// Build a client.
    ///
    /// Fails with [`ToolboxError::ConfigError`] when the API key is empty or
    /// still the sample placeholder.
    pub fn new(config: ClientConfig) -> ToolboxResult<Self> {
        let key = config.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(ToolboxError::ConfigError(
                "API key not configured. Set APIVERVE_API_KEY or pass --api-key (get a free key at https://dashboard.apiverve.com)"
                    .to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ToolboxError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl WhoisLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> ToolboxResult<WhoisResult> {
        let domain = normalize_domain(domain)?;
        log::debug!("[whois] GET {} domain={domain}", self.config.endpoint);

        let response = self
            .http
            .get(self.config.endpoint.clone())
            .query(&[("domain", domain.as_str())])
            .header(API_KEY_HEADER, self.config.api_key.trim())
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e, ""))?;

        let status_code = response.status().as_u16();
        log::debug!("[whois] Response Status: {status_code}");

        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(&e, "Failed to read response body: "))?;
        log::debug!("[whois] Response Body: {}", truncate_for_log(&body));

        parse_response(&domain, status_code, &body)
    }
}

/// The whole-request timeout can fire while the body is still streaming, so
/// both `send()` and body reads go through this.
fn map_reqwest_error(e: &reqwest::Error, context: &str) -> ToolboxError {
    if e.is_timeout() {
        ToolboxError::Timeout(format!("{context}{e}"))
    } else {
        ToolboxError::NetworkError(format!("{context}{e}"))
    }
}

/// Map a raw API response body into a [`WhoisResult`].
///
/// The body is interpreted regardless of HTTP status: the API reports most
/// failures (bad key, unknown TLD, quota) inside the JSON envelope.
fn parse_response(domain: &str, status_code: u16, body: &str) -> ToolboxResult<WhoisResult> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|e| ToolboxError::ParseError(format!("HTTP {status_code}: {e}")))?;

    if envelope.status.as_deref() != Some("ok") {
        let message = envelope
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
        log::warn!("[whois] Lookup for {domain} failed (HTTP {status_code}): {message}");
        return Err(ToolboxError::ApiError(message));
    }

    let data = envelope.data.ok_or_else(|| {
        ToolboxError::ParseError(format!("HTTP {status_code}: missing `data` field"))
    })?;
    let data: WhoisData = serde_json::from_value(data)
        .map_err(|e| ToolboxError::ParseError(format!("HTTP {status_code}: {e}")))?;

    Ok(map_whois_data(domain, data))
}

fn map_whois_data(domain: &str, data: WhoisData) -> WhoisResult {
    WhoisResult {
        domain: domain.to_string(),
        registrar: data.registrar.as_ref().and_then(value_text),
        created_date: data.created_date.as_ref().and_then(value_text),
        expiry_date: data.expiry_date.as_ref().and_then(value_text),
        updated_date: data.updated_date.as_ref().and_then(value_text),
        status: string_list(data.status.as_ref()),
        nameservers: string_list(data.nameservers.as_ref()),
        registrant: data.registrant.as_ref().and_then(Contact::from_value),
        admin: data.admin.as_ref().and_then(Contact::from_value),
        tech: data.tech.as_ref().and_then(Contact::from_value),
    }
}

/// Accept either a list of values or a single value.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
        Some(other) => value_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_response tests ====================

    #[test]
    fn test_parse_response_full() {
        let body = r#"{
            "status": "ok",
            "error": null,
            "data": {
                "domainName": "google.com",
                "registrar": "MarkMonitor, Inc.",
                "createdDate": "1997-09-15T04:00:00Z",
                "expiryDate": "2028-09-14T04:00:00Z",
                "updatedDate": "2019-09-09T15:39:04Z",
                "status": ["clientDeleteProhibited", "clientTransferProhibited"],
                "nameservers": ["ns1.google.com", "ns2.google.com"],
                "registrant": {"organization": "Google LLC", "country": "US", "email": ""},
                "admin": "REDACTED FOR PRIVACY",
                "tech": null
            }
        }"#;

        let result = parse_response("google.com", 200, body).unwrap();
        assert_eq!(result.domain, "google.com");
        assert_eq!(result.registrar.as_deref(), Some("MarkMonitor, Inc."));
        assert_eq!(result.created_date.as_deref(), Some("1997-09-15T04:00:00Z"));
        assert_eq!(result.expiry_date.as_deref(), Some("2028-09-14T04:00:00Z"));
        assert_eq!(result.updated_date.as_deref(), Some("2019-09-09T15:39:04Z"));
        assert_eq!(result.status.len(), 2);
        assert_eq!(result.nameservers, vec!["ns1.google.com", "ns2.google.com"]);
        assert_eq!(
            result.registrant,
            Some(Contact::Details(vec![
                ("organization".to_string(), "Google LLC".to_string()),
                ("country".to_string(), "US".to_string()),
            ]))
        );
        assert_eq!(
            result.admin,
            Some(Contact::Text("REDACTED FOR PRIVACY".to_string()))
        );
        assert!(result.tech.is_none());
    }

    #[test]
    fn test_parse_response_status_string() {
        let body = r#"{"status":"ok","data":{"status":"active"}}"#;
        let result = parse_response("example.nz", 200, body).unwrap();
        assert_eq!(result.status, vec!["active"]);
        assert!(result.nameservers.is_empty());
        assert!(result.registrar.is_none());
    }

    #[test]
    fn test_parse_response_empty_strings_are_absent() {
        let body = r#"{"status":"ok","data":{"registrar":"","createdDate":"  ","nameservers":[]}}"#;
        let result = parse_response("example.org", 200, body).unwrap();
        assert!(result.registrar.is_none());
        assert!(result.created_date.is_none());
        assert!(result.nameservers.is_empty());
    }

    #[test]
    fn test_parse_response_api_error() {
        let body = r#"{"status":"error","error":"Invalid API key","data":null}"#;
        assert_eq!(
            parse_response("example.com", 401, body),
            Err(ToolboxError::ApiError("Invalid API key".to_string()))
        );
    }

    #[test]
    fn test_parse_response_api_error_without_message() {
        let body = r#"{"status":"error"}"#;
        assert_eq!(
            parse_response("example.com", 200, body),
            Err(ToolboxError::ApiError(DEFAULT_API_ERROR.to_string()))
        );
    }

    #[test]
    fn test_parse_response_missing_data() {
        let body = r#"{"status":"ok"}"#;
        assert!(matches!(
            parse_response("example.com", 200, body),
            Err(ToolboxError::ParseError(msg)) if msg.contains("data")
        ));
    }

    #[test]
    fn test_parse_response_data_not_object() {
        let body = r#"{"status":"ok","data":"nope"}"#;
        assert!(matches!(
            parse_response("example.com", 200, body),
            Err(ToolboxError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_response_not_json() {
        let result = parse_response("example.com", 502, "<html>Bad Gateway</html>");
        assert!(matches!(
            result,
            Err(ToolboxError::ParseError(msg)) if msg.starts_with("HTTP 502")
        ));
    }

    // ==================== string_list tests ====================

    #[test]
    fn test_string_list_variants() {
        assert!(string_list(None).is_empty());
        assert!(string_list(Some(&Value::Null)).is_empty());
        assert_eq!(
            string_list(Some(&serde_json::json!(["a", "", "b"]))),
            vec!["a", "b"]
        );
        assert_eq!(string_list(Some(&serde_json::json!("ok"))), vec!["ok"]);
    }

    // ==================== client construction tests ====================

    #[test]
    fn test_new_rejects_missing_key() {
        assert!(matches!(
            WhoisClient::new(ClientConfig::new("")),
            Err(ToolboxError::ConfigError(_))
        ));
        assert!(matches!(
            WhoisClient::new(ClientConfig::new(PLACEHOLDER_API_KEY)),
            Err(ToolboxError::ConfigError(_))
        ));
    }

    #[test]
    fn test_new_accepts_key() {
        let client = WhoisClient::new(ClientConfig::new("abc123")).unwrap();
        assert_eq!(client.config().api_key, "abc123");
    }

    // ==================== integration tests ====================

    #[tokio::test]
    #[ignore]
    async fn test_whois_lookup_real() {
        let Ok(key) = std::env::var("APIVERVE_API_KEY") else {
            return;
        };
        let client = WhoisClient::new(ClientConfig::new(key)).unwrap();
        let info = client.lookup("google.com").await.unwrap();
        assert_eq!(info.domain, "google.com");
        assert!(info.registrar.is_some());
        assert!(!info.nameservers.is_empty());
    }
}
