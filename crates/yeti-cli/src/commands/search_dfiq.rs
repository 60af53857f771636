//! Search DFIQ command implementation.

use anyhow::{Context, Result};
use clap::Args;
use yeti::{DfiqQuery, YetiClient};

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchDfiqArgs {
    /// DFIQ name (substring match)
    #[arg(long)]
    pub name: Option<String>,

    /// DFIQ type: scenario, facet, question or approach
    #[arg(long = "type")]
    pub dfiq_type: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run(client: &YetiClient, args: SearchDfiqArgs) -> Result<()> {
    let mut query = DfiqQuery::default();
    if let Some(name) = args.name {
        query = query.name(name);
    }
    if let Some(dfiq_type) = args.dfiq_type {
        query = query.dfiq_type(dfiq_type);
    }

    let page = client
        .search_dfiq(&query, args.page.pagination())
        .await
        .context("Failed to search DFIQ")?;

    output::page(&page, args.page.pretty)
}
