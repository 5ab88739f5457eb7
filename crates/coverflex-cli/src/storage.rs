//! Token file location and client construction.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use coverflex::{ApiUrl, ClientConfig, Coverflex, FileTokenRepository};

use crate::cli::GlobalArgs;

const TOKEN_FILE: &str = "tokens.json";

/// Get the token file path, creating its directory.
pub fn token_path(global: &GlobalArgs) -> Result<PathBuf> {
    let data_dir = match &global.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("", "", "coverflex")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(TOKEN_FILE))
}

/// Build a client backed by the token file.
pub fn open_client(global: &GlobalArgs) -> Result<Coverflex> {
    let base_url = ApiUrl::new(&global.base_url).context("Invalid base URL")?;
    let config = ClientConfig::new(base_url)
        .with_timeout(Duration::from_secs(global.timeout_secs))
        .with_user_agent(concat!("coverflex-cli/", env!("COVERFLEX_VERSION")));

    let path = token_path(global)?;
    debug!(path = %path.display(), base_url = %config.base_url(), "Opening token store");

    let repo = Arc::new(FileTokenRepository::new(path));
    Coverflex::new(config, repo).context("Failed to build HTTP client")
}
