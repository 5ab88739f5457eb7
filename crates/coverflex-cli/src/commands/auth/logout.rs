use anyhow::{Context, Result};
use clap::Args;
use coverflex::Coverflex;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(client: &Coverflex, _args: LogoutArgs) -> Result<()> {
    client.logout().await.context("Failed to remove tokens")?;
    output::success("Logged out");
    Ok(())
}
