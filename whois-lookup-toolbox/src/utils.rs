//! Log sanitization utilities
//!
//! Keeps WHOIS response bodies (which may carry contact details) from being
//! dumped in full into debug logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging.
///
/// Cuts at the last char boundary at or below [`TRUNCATE_LIMIT`] and appends
/// the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let end = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}
