//! Search entities command implementation.

use anyhow::{Context, Result};
use clap::Args;
use yeti::{EntityQuery, YetiClient};

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchEntitiesArgs {
    /// Entity name (substring match)
    #[arg(long)]
    pub name: Option<String>,

    /// Entity type, e.g. malware, threat-actor
    #[arg(long = "type")]
    pub entity_type: Option<String>,

    /// Only entities carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run(client: &YetiClient, args: SearchEntitiesArgs) -> Result<()> {
    let mut query = EntityQuery::default().tags(args.tags);
    if let Some(name) = args.name {
        query = query.name(name);
    }
    if let Some(entity_type) = args.entity_type {
        query = query.entity_type(entity_type);
    }

    let page = client
        .search_entities(&query, args.page.pagination())
        .await
        .context("Failed to search entities")?;

    output::page(&page, args.page.pretty)
}
