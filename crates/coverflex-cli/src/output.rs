//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint below an error.
pub fn hint(msg: &str) {
    eprintln!("  {}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a decoded document as JSON, pretty unless `compact` is set.
pub fn document<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}

/// Print a failed command's error chain, with a next step where one exists.
pub fn report(err: &anyhow::Error) {
    error(&format!("{err:#}"));

    let api_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<coverflex::Error>());

    match api_error {
        Some(e) if e.is_unauthenticated() => hint("Run 'coverflex auth login' to sign in."),
        Some(e) if e.is_invalid_credentials() => {
            hint("Check your email, password and one-time code.")
        }
        _ => {}
    }
}
