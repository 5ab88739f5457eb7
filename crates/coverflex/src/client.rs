//! Top-level client wiring the components together.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::{AuthSession, TokenRefresher};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::ApiClient;
use crate::requester::AuthenticatedRequester;
use crate::resources::ResourceClient;
use crate::store::TokenRepository;
use crate::types::ApiUrl;

/// Entry point to the employee API.
///
/// Holds one HTTP client and one token repository, shared by the login flow,
/// the authenticated requester and the resource fetchers. Cheap to clone and
/// safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use coverflex::{ClientConfig, Coverflex, FileTokenRepository, OperationsQuery};
///
/// # async fn example() -> Result<(), coverflex::Error> {
/// let repo = Arc::new(FileTokenRepository::new("/tmp/coverflex/tokens.json"));
/// let client = Coverflex::new(ClientConfig::default(), repo)?;
///
/// if client.is_logged_in().await {
///     let page = client
///         .resources()
///         .operations(&OperationsQuery::default().per_page(5))
///         .await?;
///     println!("{} operations", page.list.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Coverflex {
    inner: Arc<CoverflexInner>,
}

struct CoverflexInner {
    base_url: ApiUrl,
    repo: Arc<dyn TokenRepository>,
    auth: AuthSession,
    requester: Arc<AuthenticatedRequester>,
    resources: ResourceClient,
}

impl Coverflex {
    /// Create a client using `repo` for token persistence.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, repo: Arc<dyn TokenRepository>) -> Result<Self, Error> {
        let client = ApiClient::new(&config)?;
        let base_url = client.base_url().clone();

        let refresher = TokenRefresher::new(client.clone(), repo.clone());
        let requester = Arc::new(AuthenticatedRequester::new(
            client.clone(),
            repo.clone(),
            refresher,
        ));

        Ok(Self {
            inner: Arc::new(CoverflexInner {
                auth: AuthSession::new(client, repo.clone()),
                resources: ResourceClient::new(base_url.clone(), requester.clone()),
                base_url,
                repo,
                requester,
            }),
        })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base_url
    }

    /// The login flow.
    pub fn auth(&self) -> &AuthSession {
        &self.inner.auth
    }

    /// Typed resource fetchers.
    pub fn resources(&self) -> &ResourceClient {
        &self.inner.resources
    }

    /// The authenticated GET engine, for endpoints without a typed fetcher.
    pub fn requester(&self) -> &AuthenticatedRequester {
        &self.inner.requester
    }

    /// Whether a token pair is stored.
    ///
    /// This does not validate the tokens; expiry is only discovered by a
    /// request.
    pub async fn is_logged_in(&self) -> bool {
        self.inner.repo.get_tokens().await.is_ok()
    }

    /// Forget the stored session.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), Error> {
        self.inner.repo.delete_tokens().await?;
        info!("Logged out");
        Ok(())
    }

    /// Renew the stored tokens now.
    ///
    /// # Errors
    ///
    /// Returns an unauthenticated error when no session is stored or the
    /// refresh is refused; in the latter case the stored tokens are deleted.
    pub async fn force_refresh(&self) -> Result<(), Error> {
        self.inner.requester.refresh().await.map(|_| ())
    }
}

impl std::fmt::Debug for Coverflex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coverflex")
            .field("base_url", &self.inner.base_url)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
