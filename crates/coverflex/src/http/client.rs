//! HTTP client for the employee API.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::error::{Error, InvalidInputError, ProtocolError, TransportError};
use crate::types::ApiUrl;

/// A fully read HTTP response.
///
/// The status is inspected by the caller, since each endpoint of the API
/// signals success with a different code (202 for an OTP challenge, 201 for a
/// new session, 200 for resource reads).
#[derive(Debug)]
pub(crate) struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body into `R`.
    pub fn decode<R: DeserializeOwned>(&self) -> Result<R, ProtocolError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn a response the caller did not expect into a protocol error.
    pub fn into_unexpected(self) -> ProtocolError {
        ProtocolError::UnexpectedStatus {
            status: self.status.as_u16(),
            body: self.body,
        }
    }
}

/// HTTP client shared by every component talking to the API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    base_url: ApiUrl,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// POST a JSON body without credentials.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, Error>
    where
        B: Serialize,
    {
        let url = self.base_url.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// POST with a bearer token and no request body.
    #[instrument(skip(self, token), fields(base = %self.base_url))]
    pub async fn post_authed(&self, path: &str, token: &str) -> Result<ApiResponse, Error> {
        let url = self.base_url.endpoint(path);
        debug!(%url, "authenticated POST");

        let response = self
            .client
            .post(&url)
            .headers(Self::auth_headers(token)?)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// GET an absolute URL with a bearer token.
    #[instrument(skip(self, token))]
    pub async fn get_authed(&self, url: &str, token: &str) -> Result<ApiResponse, Error> {
        debug!(%url, "authenticated GET");

        let response = self
            .client
            .get(url)
            .headers(Self::auth_headers(token)?)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(token: &str) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            InvalidInputError::Other {
                message: "token contains characters not allowed in a header".to_string(),
            }
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn read_response(response: reqwest::Response) -> Result<ApiResponse, Error> {
        let status = response.status();
        let body = response.text().await?;
        trace!(status = %status, len = body.len(), "response");
        Ok(ApiResponse { status, body })
    }
}
