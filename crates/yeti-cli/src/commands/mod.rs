//! Subcommand implementations.

mod download_dfiq;
mod find_indicator;
mod search_dfiq;
mod search_entities;
mod search_graph;
mod search_indicators;
mod search_observables;
mod search_tags;
mod upload_dfiq;

use anyhow::Result;
use clap::{Args, Subcommand};
use yeti::{Pagination, YetiClient};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search indicators
    SearchIndicators(search_indicators::SearchIndicatorsArgs),

    /// Fetch a single indicator by name and type
    FindIndicator(find_indicator::FindIndicatorArgs),

    /// Search entities
    SearchEntities(search_entities::SearchEntitiesArgs),

    /// Search observables
    SearchObservables(search_observables::SearchObservablesArgs),

    /// Search DFIQ objects
    SearchDfiq(search_dfiq::SearchDfiqArgs),

    /// Download DFIQ objects as a ZIP archive
    DownloadDfiq(download_dfiq::DownloadDfiqArgs),

    /// Upload a ZIP archive of DFIQ YAML
    UploadDfiq(upload_dfiq::UploadDfiqArgs),

    /// Search tags by name
    SearchTags(search_tags::SearchTagsArgs),

    /// Walk the graph from an object
    SearchGraph(search_graph::SearchGraphArgs),
}

/// Paging and output options shared by the search commands.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Results per page (0 returns everything)
    #[arg(long, default_value_t = 0)]
    pub count: u32,

    /// Page index, starting at 0
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl PageArgs {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.count, self.page)
    }
}

pub async fn handle(client: &YetiClient, command: Command) -> Result<()> {
    match command {
        Command::SearchIndicators(args) => search_indicators::run(client, args).await,
        Command::FindIndicator(args) => find_indicator::run(client, args).await,
        Command::SearchEntities(args) => search_entities::run(client, args).await,
        Command::SearchObservables(args) => search_observables::run(client, args).await,
        Command::SearchDfiq(args) => search_dfiq::run(client, args).await,
        Command::DownloadDfiq(args) => download_dfiq::run(client, args).await,
        Command::UploadDfiq(args) => upload_dfiq::run(client, args).await,
        Command::SearchTags(args) => search_tags::run(client, args).await,
        Command::SearchGraph(args) => search_graph::run(client, args).await,
    }
}
