//! Session subcommands.

mod login;
mod logout;
mod refresh;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};
use coverflex::Coverflex;

use crate::cli::GlobalArgs;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Request a one-time code, or log in with one
    Login(login::LoginArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Show whether a session is stored
    Status(status::StatusArgs),

    /// Renew the stored session tokens
    Refresh(refresh::RefreshArgs),
}

pub async fn handle(client: &Coverflex, global: &GlobalArgs, cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(client, global, args).await,
        AuthSubcommand::Logout(args) => logout::run(client, args).await,
        AuthSubcommand::Status(args) => status::run(client, global, args).await,
        AuthSubcommand::Refresh(args) => refresh::run(client, args).await,
    }
}
