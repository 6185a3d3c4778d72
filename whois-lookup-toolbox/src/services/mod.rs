//! Lookup service: input normalization, the [`WhoisLookup`] seam and its
//! HTTP implementation, plus report formatting.

mod format;
mod whois;

use async_trait::async_trait;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::WhoisResult;

pub use format::{format_date, render_error, render_json, render_json_error, render_report};
pub use whois::WhoisClient;

/// Maximum length of a fully qualified domain name in octets.
const MAX_DOMAIN_LEN: usize = 253;

/// Anything that can resolve a domain into registration data.
///
/// Implemented by [`WhoisClient`]; front ends take `&impl WhoisLookup` so they
/// can be driven by an in-memory fake in tests.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Look up registration data for `domain`.
    ///
    /// `domain` is raw user input; implementations normalize it first.
    async fn lookup(&self, domain: &str) -> ToolboxResult<WhoisResult>;
}

/// Normalise user input into the bare domain the API expects.
///
/// Lowercases, strips `http://` / `https://` and any path, passes IP
/// addresses through, converts internationalised names to Punycode via
/// IDNA 2008, and rejects empty or overlong inputs.
pub fn normalize_domain(input: &str) -> ToolboxResult<String> {
    let lowered = input.trim().to_lowercase();
    let stripped = lowered.replace("https://", "").replace("http://", "");
    let domain = stripped.split('/').next().unwrap_or_default().trim();

    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if domain.parse::<std::net::IpAddr>().is_ok() {
        return Ok(domain.to_string());
    }

    let ascii_domain = idna::domain_to_ascii_strict(domain)
        .map_err(|_| ToolboxError::ValidationError(format!("Invalid domain name: {domain}")))?;
    if ascii_domain.len() > MAX_DOMAIN_LEN {
        return Err(ToolboxError::ValidationError(format!(
            "Domain name exceeds maximum length of {MAX_DOMAIN_LEN} characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}
