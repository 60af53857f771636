//! Find indicator command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use yeti::YetiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct FindIndicatorArgs {
    /// Exact indicator name
    #[arg(long)]
    pub name: String,

    /// Indicator type
    #[arg(long = "type")]
    pub indicator_type: String,
}

pub async fn run(client: &YetiClient, args: FindIndicatorArgs) -> Result<()> {
    let indicator = client
        .find_indicator(&args.name, &args.indicator_type)
        .await
        .context("Failed to fetch indicator")?;

    match indicator {
        Some(indicator) => output::json_pretty(&indicator),
        None => bail!(
            "No {} indicator named '{}'",
            args.indicator_type,
            args.name
        ),
    }
}
