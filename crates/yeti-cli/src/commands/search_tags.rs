//! Search tags command implementation.

use anyhow::{Context, Result};
use clap::Args;
use yeti::YetiClient;

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchTagsArgs {
    /// Tag name (substring match)
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run(client: &YetiClient, args: SearchTagsArgs) -> Result<()> {
    let page = client
        .search_tags(&args.name, args.page.pagination())
        .await
        .context("Failed to search tags")?;

    output::page(&page, args.page.pretty)
}
