//! WHOIS lookup CLI
//!
//! `whois-lookup example.com` runs a single lookup; without a domain an
//! interactive prompt is started. Results go to stdout, logs to stderr.

mod app;
mod cli;
mod config;
mod interactive;
mod logging;
#[cfg(test)]
mod test_mocks;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tokio::io::BufReader;
use whois_lookup_toolbox::WhoisClient;

use app::print_error;
use cli::CommandLine;
use config::{Overrides, Settings};

fn main() -> ExitCode {
    // .env must be loaded before clap reads environment fallbacks.
    let dotenv = dotenvy::dotenv();
    let args = CommandLine::parse_args();
    logging::init(args.verbose);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match runtime.block_on(run(args)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    };

    // A pending stdin read lives on a blocking thread; don't wait for it.
    runtime.shutdown_background();
    code
}

async fn run(args: CommandLine) -> Result<ExitCode> {
    let file_config = config::load_file_config(args.config.as_deref())?;
    let settings = Settings::resolve(Overrides::from(&args), file_config)?;
    let mode = args.output_mode();
    tracing::debug!(
        "Endpoint {} (timeout {:?}, api key {})",
        settings.endpoint,
        settings.timeout,
        if settings.api_key.is_some() { "set" } else { "missing" }
    );

    let mut stdout = io::stdout().lock();

    let client = match WhoisClient::new(settings.client_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Cannot create WHOIS client: {e}");
            print_error(&mut stdout, &e, mode)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(domain) = args.domain.as_deref() {
        let ok = app::run_once(&mut stdout, &client, domain, mode).await?;
        return Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };
    interactive::run(
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        &client,
        mode,
        interrupt,
    )
    .await?;

    Ok(ExitCode::SUCCESS)
}
