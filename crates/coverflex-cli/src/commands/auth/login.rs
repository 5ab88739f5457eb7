//! Login command implementation.
//!
//! Logging in takes two runs: the first (without `--otp`) makes the server
//! text a one-time code to the employee's phone, the second submits it.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use coverflex::{Coverflex, Credentials};

use crate::cli::GlobalArgs;
use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, env = "COVERFLEX_USERNAME")]
    pub email: String,

    /// Account password
    #[arg(long, env = "COVERFLEX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// One-time code received by SMS
    #[arg(long)]
    pub otp: Option<String>,
}

pub async fn run(client: &Coverflex, global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    if client.is_logged_in().await {
        bail!("Already logged in. Run 'coverflex auth logout' first.");
    }

    let credentials = Credentials::new(&args.email, &args.password);

    let Some(otp) = args.otp else {
        eprintln!("{}", "Requesting one-time code...".dimmed());

        let challenge = client
            .auth()
            .request_otp(&credentials)
            .await
            .context("Failed to request one-time code")?;

        output::success("One-time code sent");
        output::field(
            "Phone",
            &format!("ending in {}", challenge.phone_last_digits),
        );
        println!();
        println!("Run again with --otp <CODE> to finish logging in.");
        return Ok(());
    };

    eprintln!("{}", "Logging in...".dimmed());

    let outcome = client
        .auth()
        .login(&credentials, &otp)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Email", credentials.email());
    output::field(
        "Device trusted",
        if outcome.device_trusted { "yes" } else { "no" },
    );
    output::field("Tokens", &storage::token_path(global)?.display().to_string());

    Ok(())
}
