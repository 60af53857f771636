//! Search observables command implementation.

use anyhow::{Context, Result};
use clap::Args;
use yeti::{ObservableQuery, YetiClient};

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchObservablesArgs {
    /// Observable value (substring match)
    #[arg(long)]
    pub value: Option<String>,

    /// Observable type, e.g. hostname, ipv4
    #[arg(long = "type")]
    pub observable_type: Option<String>,

    /// Only observables carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run(client: &YetiClient, args: SearchObservablesArgs) -> Result<()> {
    let mut query = ObservableQuery::default().tags(args.tags);
    if let Some(value) = args.value {
        query = query.value(value);
    }
    if let Some(observable_type) = args.observable_type {
        query = query.observable_type(observable_type);
    }

    let page = client
        .search_observables(&query, args.page.pagination())
        .await
        .context("Failed to search observables")?;

    output::page(&page, args.page.pretty)
}
