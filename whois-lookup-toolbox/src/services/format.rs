//! Plain-text and JSON rendering of lookup results.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{Contact, WhoisResult};

const HEAVY_RULE_WIDTH: usize = 55;
const LIGHT_RULE_WIDTH: usize = 51;

/// Registries attach long EPP status lists; only the head is shown.
const MAX_STATUS_LINES: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

/// Naive date-time layouts accepted besides RFC 3339.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Format an API date as `YYYY-MM-DD`.
///
/// Missing or blank input yields `N/A`; unrecognised layouts are returned
/// unchanged.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|s| !s.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    parse_date(raw).map_or_else(
        || raw.to_string(),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
///
/// `postal_code` becomes `Postal_Code`, `postalCode` becomes `Postalcode`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Line-oriented text block; every line ends with `\n`.
#[derive(Default)]
struct Block {
    lines: Vec<String>,
}

impl Block {
    fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.line(String::new())
    }

    fn heavy_rule(&mut self) -> &mut Self {
        self.line("=".repeat(HEAVY_RULE_WIDTH))
    }

    fn section(&mut self, title: &str) -> &mut Self {
        self.blank()
            .line(format!("  {title}"))
            .line(format!("  {}", "-".repeat(LIGHT_RULE_WIDTH)))
    }

    fn item(&mut self, value: &str) -> &mut Self {
        self.line(format!("    {value}"))
    }

    fn contact(&mut self, title: &str, contact: Option<&Contact>) -> &mut Self {
        match contact {
            Some(Contact::Details(fields)) => {
                self.section(title);
                for (key, value) in fields {
                    self.item(&format!("{}: {value}", title_case(key)));
                }
            }
            Some(Contact::Text(text)) => {
                self.section(title).item(text);
            }
            None => {}
        }
        self
    }

    fn finish(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Render the human-readable report for a successful lookup.
pub fn render_report(result: &WhoisResult) -> String {
    let mut block = Block::default();
    block
        .blank()
        .heavy_rule()
        .line(format!("  WHOIS Lookup: {}", result.domain))
        .heavy_rule();

    block
        .section("Registrar Information")
        .line(format!(
            "  Registrar:      {}",
            result.registrar.as_deref().unwrap_or(NOT_AVAILABLE)
        ))
        .line(format!(
            "  Created:        {}",
            format_date(result.created_date.as_deref())
        ))
        .line(format!(
            "  Expires:        {}",
            format_date(result.expiry_date.as_deref())
        ))
        .line(format!(
            "  Updated:        {}",
            format_date(result.updated_date.as_deref())
        ));

    if !result.status.is_empty() {
        block.section("Domain Status");
        for status in result.status.iter().take(MAX_STATUS_LINES) {
            block.item(status);
        }
    }

    if !result.nameservers.is_empty() {
        block.section("Nameservers");
        for ns in &result.nameservers {
            block.item(ns);
        }
    }

    block
        .contact("Registrant Contact", result.registrant.as_ref())
        .contact("Admin Contact", result.admin.as_ref())
        .contact("Tech Contact", result.tech.as_ref());

    block.blank().heavy_rule().blank().finish()
}

/// Render the boxed error block.
pub fn render_error(error: &ToolboxError) -> String {
    Block::default()
        .blank()
        .heavy_rule()
        .line(format!("  Error: {error}"))
        .heavy_rule()
        .blank()
        .finish()
}

/// Render a successful lookup as pretty-printed JSON.
pub fn render_json(result: &WhoisResult) -> ToolboxResult<String> {
    serde_json::to_string_pretty(result)
        .map_err(|e| ToolboxError::ParseError(format!("Failed to serialize result: {e}")))
}

/// Render an error as a JSON object with a single `error` member.
pub fn render_json_error(error: &ToolboxError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}
