//! coverflex - Authenticated client for the Coverflex employee API.
//!
//! The library logs a user in (password, SMS one-time passcode and a
//! device-trust upgrade), persists the resulting tokens through a
//! [`TokenRepository`], and reads employee resources with bearer
//! authentication. An expired access token is refreshed transparently, at
//! most once per request and at most once across concurrent requests.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use coverflex::{ClientConfig, Coverflex, Credentials, MemoryTokenRepository};
//!
//! # async fn example() -> Result<(), coverflex::Error> {
//! let client = Coverflex::new(ClientConfig::default(), Arc::new(MemoryTokenRepository::new()))?;
//!
//! let credentials = Credentials::new("alice@example.com", "hunter2");
//! client.auth().request_otp(&credentials).await?;
//! client.auth().login(&credentials, "123456").await?;
//!
//! for benefit in client.resources().benefits().await? {
//!     println!("{}", benefit.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
mod http;
pub mod requester;
pub mod resources;
pub mod store;
pub mod types;

mod client;

// Re-export primary types at crate root for convenience
pub use auth::{AuthSession, Credentials, LoginOutcome, OtpChallenge, TokenPair, TokenRefresher};
pub use client::Coverflex;
pub use config::ClientConfig;
pub use error::Error;
pub use requester::AuthenticatedRequester;
pub use resources::{OperationsQuery, ResourceClient};
pub use store::{FileTokenRepository, MemoryTokenRepository, TokenRepository};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
