//! Upload DFIQ archive command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use yeti::YetiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct UploadDfiqArgs {
    /// ZIP archive of DFIQ YAML files
    pub archive: PathBuf,
}

pub async fn run(client: &YetiClient, args: UploadDfiqArgs) -> Result<()> {
    let counts = client
        .upload_dfiq_archive(&args.archive)
        .await
        .with_context(|| format!("Failed to upload {}", args.archive.display()))?;

    output::json(&counts)
}
