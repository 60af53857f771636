//! Download DFIQ archive command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use yeti::YetiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DownloadDfiqArgs {
    /// Where to write the ZIP archive
    #[arg(long, short)]
    pub output: PathBuf,

    /// Only include DFIQ objects of this type
    #[arg(long = "type")]
    pub dfiq_type: Option<String>,
}

pub async fn run(client: &YetiClient, args: DownloadDfiqArgs) -> Result<()> {
    let archive = client
        .download_dfiq_archive(args.dfiq_type.as_deref())
        .await
        .context("Failed to download DFIQ archive")?;

    tokio::fs::write(&args.output, &archive)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    output::success(&format!("Saved DFIQ archive to {}", args.output.display()));
    output::field("Size", &format!("{} bytes", archive.len()));

    Ok(())
}
