//! Interactive prompt loop.
//!
//! Reads one domain per line until `quit`, end of input, or the interrupt
//! future resolves (Ctrl-C in the real binary). An interrupt also abandons a
//! lookup that is still in flight.

use std::future::Future;
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use whois_lookup_toolbox::WhoisLookup;

use crate::app::{OutputMode, print_outcome};

const RULE_WIDTH: usize = 55;
const PROMPT: &str = "Enter domain (e.g., google.com): ";
const QUIT_COMMAND: &str = "quit";

fn write_banner<W: Write>(out: &mut W) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "  WHOIS Lookup Tool")?;
    writeln!(out, "  Powered by APIVerve")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    writeln!(out, "Look up domain registration information")?;
    writeln!(out, "Type '{QUIT_COMMAND}' to exit")?;
    writeln!(out)
}

/// Run the prompt loop until the user quits.
pub async fn run<R, W, L, I>(
    input: R,
    out: &mut W,
    lookup: &L,
    mode: OutputMode,
    interrupt: I,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    L: WhoisLookup + ?Sized,
    I: Future<Output = ()>,
{
    write_banner(out)?;
    tracing::info!("Interactive session started");

    let mut lines = input.lines();
    tokio::pin!(interrupt);

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut interrupt => {
                writeln!(out, "\n")?;
                break;
            }
        };

        let Some(line) = line else {
            // EOF: finish the prompt line before signing off.
            writeln!(out)?;
            break;
        };

        let domain = line.trim();
        if domain.eq_ignore_ascii_case(QUIT_COMMAND) {
            break;
        }
        if domain.is_empty() {
            writeln!(out, "Please enter a domain.\n")?;
            continue;
        }

        let outcome = tokio::select! {
            outcome = lookup.lookup(domain) => outcome,
            () = &mut interrupt => {
                tracing::info!("Lookup for {domain} interrupted");
                writeln!(out, "\n")?;
                break;
            }
        };
        if let Err(e) = &outcome {
            tracing::debug!("Lookup for {domain} failed: {e:?}");
        }
        print_outcome(out, &outcome, mode)?;
    }

    writeln!(out, "Goodbye!\n")?;
    out.flush()?;
    tracing::info!("Interactive session ended");
    Ok(())
}
