use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(client: &Coverflex, _args: RefreshArgs) -> Result<()> {
    client
        .force_refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed");
    Ok(())
}
