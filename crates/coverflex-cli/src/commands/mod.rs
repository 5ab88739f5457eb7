//! Command implementations.

pub mod auth;
pub mod employee;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::storage;

pub async fn handle(cli: Cli) -> Result<()> {
    let global = cli.global;
    let client = storage::open_client(&global)?;

    match cli.command {
        Commands::Auth(cmd) => auth::handle(&client, &global, cmd).await,
        Commands::Benefits(args) => employee::benefits::run(&client, &global, args).await,
        Commands::Cards(args) => employee::cards::run(&client, &global, args).await,
        Commands::Company(args) => employee::company::run(&client, &global, args).await,
        Commands::Compensation(args) => {
            employee::compensation::run(&client, &global, args).await
        }
        Commands::Family(args) => employee::family::run(&client, &global, args).await,
        Commands::Operations(args) => employee::operations::run(&client, &global, args).await,
    }
}
