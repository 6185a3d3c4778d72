use std::path::PathBuf;

use clap::{ArgAction, Parser};
use url::Url;

use crate::app::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "whois-lookup")]
#[command(version)]
#[command(about = "Look up domain registration information via the APIVerve WHOIS API.")]
#[command(long_about = "Look up domain registration information via the APIVerve WHOIS API.\n\n\
    With a DOMAIN argument the lookup runs once; without one an interactive prompt is started.")]
pub struct CommandLine {
    /// Domain to look up (e.g. google.com); omit for interactive mode
    pub domain: Option<String>,

    /// APIVerve API key
    #[arg(long, env = "APIVERVE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// WHOIS lookup endpoint
    #[arg(long, env = "WHOIS_LOOKUP_ENDPOINT")]
    pub endpoint: Option<Url>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to <config dir>/whois-lookup/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}
