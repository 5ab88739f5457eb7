//! Refresh-token exchange.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::error::ProtocolError;
use crate::http::{ApiClient, RENEW, RenewResponse};
use crate::store::TokenRepository;

use super::tokens::{RefreshToken, TokenPair};

/// Exchanges a refresh token for a new token pair and persists it.
///
/// Refresh never fails loudly: any problem is logged and reported as an
/// empty [`TokenPair`], so callers only need [`TokenPair::is_empty`].
pub struct TokenRefresher {
    client: ApiClient,
    repo: Arc<dyn TokenRepository>,
}

impl TokenRefresher {
    pub(crate) fn new(client: ApiClient, repo: Arc<dyn TokenRepository>) -> Self {
        Self { client, repo }
    }

    /// Renew the session using `refresh_token`.
    ///
    /// On success the new pair is written to the repository before it is
    /// returned. A failed write-back is logged and the pair is still
    /// returned, since the tokens are valid for the current process.
    #[instrument(skip_all)]
    pub async fn refresh_tokens(&self, refresh_token: &RefreshToken) -> TokenPair {
        if refresh_token.is_empty() {
            warn!("No refresh token available");
            return TokenPair::empty();
        }

        info!("Refreshing tokens");

        let pair = match self.exchange(refresh_token).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return TokenPair::empty();
            }
        };

        if let Err(e) = self
            .repo
            .save_tokens(pair.access_token().as_str(), pair.refresh_token().as_str())
            .await
        {
            warn!(error = %e, "Failed to persist refreshed tokens, continuing with in-memory pair");
        }

        info!("Tokens refreshed");
        pair
    }

    async fn exchange(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let response = self
            .client
            .post_authed(RENEW, refresh_token.as_str())
            .await?;

        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(response.into_unexpected().into());
        }

        let renewed: RenewResponse = response.decode()?;
        if renewed.data.access_token.is_empty() {
            return Err(ProtocolError::MissingToken {
                field: "access_token",
            }
            .into());
        }
        if renewed.data.refresh_token.is_empty() {
            return Err(ProtocolError::MissingToken {
                field: "refresh_token",
            }
            .into());
        }

        Ok(TokenPair::new(
            renewed.data.access_token,
            renewed.data.refresh_token,
        ))
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
