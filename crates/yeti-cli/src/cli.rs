//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Query and feed a Yeti threat-intelligence instance.
#[derive(Parser, Debug)]
#[command(name = "yetictl")]
#[command(author, version = env!("YETICTL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Root URL of the Yeti instance
    #[arg(long, env = "YETI_WEB_ROOT")]
    pub endpoint: String,

    /// API key to authenticate with
    #[arg(long, env = "YETI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}
