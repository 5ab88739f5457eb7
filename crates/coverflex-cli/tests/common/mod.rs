use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;

/// Build a CLI invocation isolated from the user's data dir and `.env`.
fn command(args: &[&str], data_dir: &Path, base_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_coverflex"));
    cmd.args(args);
    cmd.current_dir(data_dir);
    cmd.env("HOME", data_dir);
    cmd.env("XDG_DATA_HOME", data_dir.join("xdg"));
    cmd.env("COVERFLEX_DATA_DIR", data_dir);
    cmd.env("COVERFLEX_BASE_URL", base_url);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("COVERFLEX_USERNAME");
    cmd.env_remove("COVERFLEX_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI against `base_url` with tokens kept in `data_dir`.
pub async fn run_cli(args: &[&str], data_dir: &Path, base_url: &str) -> Output {
    command(args, data_dir, base_url)
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], data_dir: &Path, base_url: &str) -> String {
    let output = run_cli(args, data_dir, base_url).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(args: &[&str], data_dir: &Path, base_url: &str) -> String {
    let output = run_cli(args, data_dir, base_url).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn token_file(data_dir: &Path) -> PathBuf {
    data_dir.join("tokens.json")
}

/// Store a session as if a previous login had succeeded.
pub fn seed_tokens(data_dir: &Path, access: &str, refresh: &str) {
    let body = serde_json::json!({"access_token": access, "refresh_token": refresh});
    std::fs::write(token_file(data_dir), body.to_string()).unwrap();
}

pub fn read_tokens(data_dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(token_file(data_dir)).unwrap();
    serde_json::from_str(&raw).unwrap()
}
