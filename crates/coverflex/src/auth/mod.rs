//! Authentication types and session management.
//!
//! This module provides the login state machine ([`AuthSession`]), the
//! refresh-token exchange ([`TokenRefresher`]) and the token value types.

mod credentials;
mod refresher;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use refresher::TokenRefresher;
pub use session::{AuthSession, LoginOutcome, OtpChallenge};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
