//! Operations command implementation.

use anyhow::{Context, Result};
use clap::Args;
use coverflex::{Coverflex, OperationsQuery};

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct OperationsArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Operations per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Only show operations of this type (e.g. card_payment)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

impl OperationsArgs {
    fn query(&self) -> OperationsQuery {
        let mut query = OperationsQuery::default();
        if let Some(page) = self.page {
            query = query.page(page);
        }
        if let Some(per_page) = self.per_page {
            query = query.per_page(per_page);
        }
        if let Some(kind) = &self.kind {
            query = query.filter_type(kind);
        }
        query
    }
}

pub async fn run(client: &Coverflex, global: &GlobalArgs, args: OperationsArgs) -> Result<()> {
    let page = client
        .resources()
        .operations(&args.query())
        .await
        .context("Failed to fetch operations")?;

    output::document(&page, global.compact)
}
