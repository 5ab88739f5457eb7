//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use coverflex::types::DEFAULT_API_URL;

use crate::commands::auth::AuthCommand;
use crate::commands::employee::{
    BenefitsArgs, CardsArgs, CompanyArgs, CompensationArgs, FamilyArgs, OperationsArgs,
};

/// Command line client for the Coverflex employee API.
#[derive(Parser, Debug)]
#[command(name = "coverflex")]
#[command(author, version = env!("COVERFLEX_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API base URL
    #[arg(long, env = "COVERFLEX_BASE_URL", default_value = DEFAULT_API_URL, global = true)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "COVERFLEX_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Directory holding the token file
    #[arg(long, env = "COVERFLEX_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management (login, logout, status, refresh)
    Auth(AuthCommand),

    /// List the benefits you are enrolled in
    Benefits(BenefitsArgs),

    /// List your payment cards
    Cards(CardsArgs),

    /// Show your employer's company profile
    Company(CompanyArgs),

    /// Show your compensation balances
    Compensation(CompensationArgs),

    /// List your registered family members
    Family(FamilyArgs),

    /// List account operations, one page at a time
    Operations(OperationsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn operations_flags_parse() {
        let cli = Cli::try_parse_from([
            "coverflex",
            "operations",
            "--page",
            "3",
            "--per-page",
            "10",
            "--type",
            "card_payment",
            "--compact",
        ])
        .unwrap();

        assert!(cli.global.compact);
        match cli.command {
            Commands::Operations(args) => {
                assert_eq!(args.page, Some(3));
                assert_eq!(args.per_page, Some(10));
                assert_eq!(args.kind.as_deref(), Some("card_payment"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
