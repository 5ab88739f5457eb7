use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CardsArgs {}

pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: CardsArgs) -> Result<()> {
    let cards = client
        .resources()
        .cards()
        .await
        .context("Failed to fetch cards")?;

    output::document(&cards, global.compact)
}
