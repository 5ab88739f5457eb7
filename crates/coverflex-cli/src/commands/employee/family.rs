use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct FamilyArgs {}

pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: FamilyArgs) -> Result<()> {
    let family = client
        .resources()
        .family()
        .await
        .context("Failed to fetch family members")?;

    output::document(&family, global.compact)
}
