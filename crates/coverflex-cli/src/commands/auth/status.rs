//! Status command implementation.

use anyhow::Result;
use clap::Args;
use coverflex::Coverflex;

use crate::cli::GlobalArgs;
use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Reports what is stored locally; it does not contact the API.
pub async fn run(client: &Coverflex, global: &GlobalArgs, _args: StatusArgs) -> Result<()> {
    let status = if client.is_logged_in().await {
        "logged in"
    } else {
        "not logged in"
    };

    output::field("Status", status);
    output::field("API", client.base_url().as_str());
    output::field("Tokens", &storage::token_path(global)?.display().to_string());

    Ok(())
}
