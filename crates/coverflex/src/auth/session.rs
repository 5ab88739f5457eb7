//! Login flow: OTP challenge, OTP submission and device trust.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthError, Error, InvalidInputError, ProtocolError};
use crate::http::{
    ApiClient, ApiResponse, OtpChallengeResponse, SESSIONS, SessionRequest, SessionTokensResponse,
    TRUST_USER_AGENT,
};
use crate::store::TokenRepository;

use super::credentials::Credentials;
use super::tokens::TokenPair;

/// Result of a password-only login attempt: the server sent an OTP by SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    /// Last digits of the phone number the OTP was sent to.
    pub phone_last_digits: String,
}

/// Result of a completed login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The pair that was persisted.
    pub tokens: TokenPair,
    /// Whether the device-trust upgrade issued the persisted pair.
    pub device_trusted: bool,
}

/// Drives the multi-step login protocol.
///
/// Each step is a complete exchange keyed only by the credentials the caller
/// supplies again, so the caller may pause between [`request_otp`] and
/// [`login`] for as long as it needs to collect the OTP.
///
/// Two logins for the same account must not run concurrently; the caller is
/// expected to serialize them.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use coverflex::{ClientConfig, Coverflex, Credentials, MemoryTokenRepository};
///
/// # async fn example() -> Result<(), coverflex::Error> {
/// let client = Coverflex::new(ClientConfig::default(), Arc::new(MemoryTokenRepository::new()))?;
/// let creds = Credentials::new("alice@example.com", "hunter2");
///
/// let challenge = client.auth().request_otp(&creds).await?;
/// println!("OTP sent to ...{}", challenge.phone_last_digits);
///
/// let outcome = client.auth().login(&creds, "123456").await?;
/// println!("device trusted: {}", outcome.device_trusted);
/// # Ok(())
/// # }
/// ```
///
/// [`request_otp`]: AuthSession::request_otp
/// [`login`]: AuthSession::login
pub struct AuthSession {
    client: ApiClient,
    repo: Arc<dyn TokenRepository>,
}

impl AuthSession {
    pub(crate) fn new(client: ApiClient, repo: Arc<dyn TokenRepository>) -> Self {
        Self { client, repo }
    }

    /// Post the credentials and ask the server to send an OTP.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the server rejects the
    /// credentials. Nothing is retried.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn request_otp(&self, credentials: &Credentials) -> Result<OtpChallenge, Error> {
        validate_credentials(credentials)?;
        info!("Requesting OTP");

        let request = SessionRequest {
            email: credentials.email(),
            password: credentials.password(),
            otp: None,
        };
        let response = self.client.post_json(SESSIONS, &request).await?;

        if response.status() != StatusCode::ACCEPTED {
            return Err(rejection(response));
        }

        let challenge: OtpChallengeResponse = response.decode()?;
        debug!(phone_last_digits = %challenge.phone_last_digits, "OTP challenge issued");

        Ok(OtpChallenge {
            phone_last_digits: challenge.phone_last_digits,
        })
    }

    /// Submit the OTP, upgrade to a trusted device and persist the tokens.
    ///
    /// The device-trust step is best effort: when it fails the pair from the
    /// OTP submission is persisted instead.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the credentials or OTP
    /// are rejected (the caller must start again with [`request_otp`]), and a
    /// persistence error when the tokens could not be saved.
    ///
    /// [`request_otp`]: AuthSession::request_otp
    #[instrument(skip(self, credentials, otp), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials, otp: &str) -> Result<LoginOutcome, Error> {
        validate_credentials(credentials)?;
        if otp.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "OTP must not be empty".to_string(),
            }
            .into());
        }

        info!("Submitting OTP");

        let request = SessionRequest {
            email: credentials.email(),
            password: credentials.password(),
            otp: Some(otp.trim()),
        };
        let response = self.client.post_json(SESSIONS, &request).await?;

        if response.status() != StatusCode::CREATED {
            return Err(rejection(response));
        }

        let session: SessionTokensResponse = response.decode()?;
        if session.token.is_empty() {
            return Err(ProtocolError::MissingToken { field: "token" }.into());
        }
        let tokens = TokenPair::new(session.token, session.refresh_token);

        info!("Authenticated");

        let (tokens, device_trusted) = match self.trust_device(&tokens).await {
            Some(trusted) => (trusted, true),
            None => (tokens, false),
        };

        self.repo
            .save_tokens(
                tokens.access_token().as_str(),
                tokens.refresh_token().as_str(),
            )
            .await?;

        info!(device_trusted, "Login complete");

        Ok(LoginOutcome {
            tokens,
            device_trusted,
        })
    }

    /// Ask the server for longer-lived tokens bound to this client.
    ///
    /// Returns `None` on any failure; the caller keeps its current pair.
    #[instrument(skip_all)]
    async fn trust_device(&self, tokens: &TokenPair) -> Option<TokenPair> {
        info!("Trusting this device");

        let response = match self
            .client
            .post_authed(TRUST_USER_AGENT, tokens.access_token().as_str())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Device trust request failed");
                return None;
            }
        };

        if response.status() != StatusCode::CREATED {
            warn!(status = %response.status(), "Device trust rejected");
            return None;
        }

        let trusted: SessionTokensResponse = match response.decode() {
            Ok(trusted) => trusted,
            Err(e) => {
                warn!(error = %e, "Device trust response was not understood");
                return None;
            }
        };

        if trusted.token.is_empty() || trusted.refresh_token.is_empty() {
            warn!("Device trust response did not carry a full token pair");
            return None;
        }

        if trusted.user_agent_token.is_some_and(|t| !t.is_empty()) {
            debug!("Received user agent token for long-term session");
        }

        info!("Device trusted");
        Some(TokenPair::new(trusted.token, trusted.refresh_token))
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

fn validate_credentials(credentials: &Credentials) -> Result<(), Error> {
    if credentials.email().trim().is_empty() || credentials.password().is_empty() {
        return Err(InvalidInputError::Other {
            message: "email and password are required".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Map a non-success session response to an error.
///
/// Client errors mean the credentials or OTP were refused; anything else is
/// reported as an unexpected response.
fn rejection(response: ApiResponse) -> Error {
    let status = response.status();
    if status.is_client_error() {
        warn!(status = %status, "Login rejected");
        AuthError::InvalidCredentials {
            status: status.as_u16(),
            body: response.body().to_string(),
        }
        .into()
    } else {
        response.into_unexpected().into()
    }
}
