use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CompanyArgs {}

pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: CompanyArgs) -> Result<()> {
    let company = client
        .resources()
        .company()
        .await
        .context("Failed to fetch company profile")?;

    output::document(&company, global.compact)
}
