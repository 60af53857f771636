//! Search indicators command implementation.

use anyhow::{Context, Result};
use clap::Args;
use yeti::{IndicatorQuery, YetiClient};

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchIndicatorsArgs {
    /// Indicator name (substring match)
    #[arg(long)]
    pub name: Option<String>,

    /// Indicator type, e.g. yara, sigma, regex
    #[arg(long = "type", default_value = "yara")]
    pub indicator_type: String,

    /// Pattern to match
    #[arg(long)]
    pub pattern: Option<String>,

    /// Only indicators carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Print indicator names only
    #[arg(long)]
    pub names_only: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run(client: &YetiClient, args: SearchIndicatorsArgs) -> Result<()> {
    let mut query = IndicatorQuery::default()
        .indicator_type(args.indicator_type)
        .tags(args.tags);
    if let Some(name) = args.name {
        query = query.name(name);
    }
    if let Some(pattern) = args.pattern {
        query = query.pattern(pattern);
    }

    let page = client
        .search_indicators(&query, args.page.pagination())
        .await
        .context("Failed to search indicators")?;

    if args.names_only {
        for indicator in &page.items {
            if let Some(name) = indicator["name"].as_str() {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    output::page(&page, args.page.pretty)
}
