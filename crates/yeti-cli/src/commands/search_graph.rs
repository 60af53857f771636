//! Graph search command implementation.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use yeti::{Direction, GraphSearch, Pagination, YetiClient};

use crate::output;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DirectionArg {
    Outbound,
    Inbound,
    Any,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Outbound => Direction::Outbound,
            DirectionArg::Inbound => Direction::Inbound,
            DirectionArg::Any => Direction::Any,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchGraphArgs {
    /// Starting object as <root_type>/<id>, e.g. dfiq/12
    #[arg(long)]
    pub source: String,

    /// Object type to return (repeatable)
    #[arg(long = "target-type")]
    pub target_types: Vec<String>,

    /// Graph to walk
    #[arg(long, default_value = "links")]
    pub graph: String,

    #[arg(long, default_value_t = 1)]
    pub min_hops: u32,

    #[arg(long, default_value_t = 1)]
    pub max_hops: u32,

    #[arg(long, value_enum, default_value = "outbound")]
    pub direction: DirectionArg,

    /// Leave the source object out of the results
    #[arg(long)]
    pub exclude_original: bool,

    /// Results per page (0 returns everything)
    #[arg(long, default_value_t = 0)]
    pub count: u32,

    /// Page index, starting at 0
    #[arg(long, default_value_t = 0)]
    pub page: u32,
}

pub async fn run(client: &YetiClient, args: SearchGraphArgs) -> Result<()> {
    let search = GraphSearch::new(args.source, args.target_types)
        .graph(args.graph)
        .hops(args.min_hops, args.max_hops)
        .direction(args.direction.into())
        .include_original(!args.exclude_original);

    let result = client
        .search_graph(&search, Pagination::new(args.count, args.page))
        .await
        .context("Failed to search graph")?;

    output::json_pretty(&result)
}
