//! Benefits command implementation.

use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BenefitsArgs {}

pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: BenefitsArgs) -> Result<()> {
    let benefits = client
        .resources()
        .benefits()
        .await
        .context("Failed to fetch benefits")?;

    output::document(&benefits, global.compact)
}
