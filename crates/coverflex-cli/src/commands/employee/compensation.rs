use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CompensationArgs {}

pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: CompensationArgs) -> Result<()> {
    let compensation = client
        .resources()
        .compensation()
        .await
        .context("Failed to fetch compensation")?;

    output::document(&compensation, global.compact)
}
