//! One-shot lookup and shared output handling.

use std::io::{self, Write};

use whois_lookup_toolbox::{
    ToolboxError, ToolboxResult, WhoisLookup, WhoisResult, render_error, render_json,
    render_json_error, render_report,
};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Write an error in the selected output mode.
pub fn print_error<W: Write>(out: &mut W, error: &ToolboxError, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Text => write!(out, "{}", render_error(error)),
        OutputMode::Json => writeln!(out, "{}", render_json_error(error)),
    }
}

/// Write a lookup outcome in the selected output mode.
pub fn print_outcome<W: Write>(
    out: &mut W,
    outcome: &ToolboxResult<WhoisResult>,
    mode: OutputMode,
) -> io::Result<()> {
    match (outcome, mode) {
        (Ok(result), OutputMode::Text) => write!(out, "{}", render_report(result)),
        (Ok(result), OutputMode::Json) => match render_json(result) {
            Ok(json) => writeln!(out, "{json}"),
            Err(e) => print_error(out, &e, mode),
        },
        (Err(e), _) => print_error(out, e, mode),
    }?;
    out.flush()
}

/// Look up a single domain and print the outcome.
///
/// Returns whether the lookup succeeded.
pub async fn run_once<W, L>(out: &mut W, lookup: &L, domain: &str, mode: OutputMode) -> io::Result<bool>
where
    W: Write,
    L: WhoisLookup + ?Sized,
{
    tracing::info!("Looking up {domain}");
    let outcome = lookup.lookup(domain).await;
    if let Err(e) = &outcome {
        tracing::debug!("Lookup for {domain} failed: {e:?}");
    }
    print_outcome(out, &outcome, mode)?;
    Ok(outcome.is_ok())
}
