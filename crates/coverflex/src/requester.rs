//! Bearer-authenticated GET with one refresh-and-retry on expiry.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::auth::{AccessToken, TokenPair, TokenRefresher};
use crate::error::{Error, PersistenceError};
use crate::http::{ApiClient, ApiResponse};
use crate::store::TokenRepository;

/// Retries after a 401. A second 401 is reported, never retried.
const MAX_RETRIES: u32 = 1;

/// The last successful refresh.
///
/// While the repository still holds `replaced` (the write-back failed), the
/// refreshed pair stands in for it.
struct Renewal {
    replaced: AccessToken,
    tokens: TokenPair,
}

impl Renewal {
    /// The pair to use given what the repository holds.
    fn resolve(last: Option<&Renewal>, stored: TokenPair) -> TokenPair {
        match last {
            Some(last) if stored.access_token() == &last.replaced => last.tokens.clone(),
            _ => stored,
        }
    }
}

/// Issues authenticated reads on behalf of every resource fetch.
///
/// Each logical request makes at most two HTTP calls: the first attempt and,
/// after a 401 and a successful refresh, exactly one retry. Concurrent callers
/// that hit a 401 with the same access token share a single call to the
/// renew endpoint.
pub struct AuthenticatedRequester {
    client: ApiClient,
    repo: Arc<dyn TokenRepository>,
    refresher: TokenRefresher,
    renewal: Mutex<Option<Renewal>>,
}

impl AuthenticatedRequester {
    pub(crate) fn new(
        client: ApiClient,
        repo: Arc<dyn TokenRepository>,
        refresher: TokenRefresher,
    ) -> Self {
        Self {
            client,
            repo,
            refresher,
            renewal: Mutex::new(None),
        }
    }

    /// GET `url` with the stored access token and decode the 200 body.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthenticated`] when no tokens are stored, or when the
    ///   token expired and could not be refreshed (stored tokens are deleted).
    /// - [`TransportError`] on network failure; not retried.
    /// - [`ProtocolError::UnexpectedStatus`] for any status other than 200,
    ///   including a second 401 after a successful refresh.
    /// - [`ProtocolError::Decode`] when the body does not match `T`.
    ///
    /// [`AuthError::Unauthenticated`]: crate::error::AuthError::Unauthenticated
    /// [`TransportError`]: crate::error::TransportError
    /// [`ProtocolError::UnexpectedStatus`]: crate::error::ProtocolError::UnexpectedStatus
    /// [`ProtocolError::Decode`]: crate::error::ProtocolError::Decode
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let mut tokens = self.current_tokens().await?;
        let mut retries = 0;

        loop {
            let response = self
                .client
                .get_authed(url, tokens.access_token().as_str())
                .await?;
            if response.status() != StatusCode::UNAUTHORIZED || retries == MAX_RETRIES {
                return Self::finish(response);
            }

            info!("Access token rejected, refreshing");
            tokens = self.renew(tokens.access_token()).await?;
            retries += 1;
            debug!(retries, "Retrying request with refreshed token");
        }
    }

    /// Refresh the stored session now, regardless of token expiry.
    ///
    /// Shares the refresh coordination of [`get`](Self::get). On failure the
    /// stored tokens are deleted and an unauthenticated error is returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<TokenPair, Error> {
        let tokens = self.current_tokens().await?;
        self.renew(tokens.access_token()).await
    }

    /// The stored pair, or the pair of an earlier refresh that never reached
    /// the repository.
    async fn current_tokens(&self) -> Result<TokenPair, Error> {
        let renewal = self.renewal.lock().await;
        let stored = self.stored_tokens().await?;
        Ok(Renewal::resolve(renewal.as_ref(), stored))
    }

    async fn stored_tokens(&self) -> Result<TokenPair, Error> {
        match self.repo.get_tokens().await {
            Ok(tokens) => Ok(tokens),
            Err(Error::Persistence(PersistenceError::NotFound)) => {
                Err(Error::unauthenticated("no stored session, log in first"))
            }
            Err(e) => Err(e),
        }
    }

    /// Obtain a pair that replaces `rejected`, refreshing at most once across
    /// all concurrent callers that observed the same rejected token.
    async fn renew(&self, rejected: &AccessToken) -> Result<TokenPair, Error> {
        let mut renewal = self.renewal.lock().await;

        let stored = self.stored_tokens().await?;
        let current = Renewal::resolve(renewal.as_ref(), stored.clone());
        if current.access_token() != rejected {
            debug!("Tokens replaced while waiting, reusing them");
            return Ok(current);
        }

        let refreshed = self.refresher.refresh_tokens(current.refresh_token()).await;
        if refreshed.is_empty() {
            *renewal = None;
            if let Err(e) = self.repo.delete_tokens().await {
                warn!(error = %e, "Failed to delete stored tokens");
            }
            return Err(Error::unauthenticated(
                "session expired and could not be refreshed, log in again",
            ));
        }

        // Keyed on what the repository held, in case the write-back failed.
        *renewal = Some(Renewal {
            replaced: stored.access_token().clone(),
            tokens: refreshed.clone(),
        });
        Ok(refreshed)
    }

    fn finish<T: DeserializeOwned>(response: ApiResponse) -> Result<T, Error> {
        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "Request failed");
            return Err(response.into_unexpected().into());
        }
        Ok(response.decode()?)
    }
}

impl std::fmt::Debug for AuthenticatedRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedRequester")
            .field("client", &self.client)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
