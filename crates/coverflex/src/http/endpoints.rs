//! Endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Password login, OTP challenge and OTP submission.
pub const SESSIONS: &str = "sessions";

/// Device-trust upgrade for a freshly authenticated session.
pub const TRUST_USER_AGENT: &str = "sessions/trust-user-agent";

/// Refresh-token exchange.
pub const RENEW: &str = "sessions/renew";

pub const BENEFITS: &str = "benefits";
pub const CARDS: &str = "cards";
pub const COMPANY: &str = "company";
pub const COMPENSATION: &str = "compensation";
pub const FAMILY: &str = "family";
pub const OPERATIONS: &str = "operations";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for `POST /sessions`.
#[derive(Serialize)]
pub struct SessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<&'a str>,
}

/// 202 response to a session request without OTP.
#[derive(Debug, Deserialize)]
pub struct OtpChallengeResponse {
    #[serde(default)]
    pub phone_last_digits: String,
}

/// 201 response from `POST /sessions` (with OTP) and from the trust endpoint.
#[derive(Deserialize)]
pub struct SessionTokensResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub user_agent_token: Option<String>,
}

/// Response from `POST /sessions/renew`.
#[derive(Deserialize)]
pub struct RenewResponse {
    pub data: RenewData,
}

#[derive(Deserialize)]
pub struct RenewData {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_request_omits_missing_otp() {
        let body = SessionRequest {
            email: "a@b.com",
            password: "pw",
            otp: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.com", "password": "pw"}));
    }

    #[test]
    fn renew_response_decodes_nested_tokens() {
        let body: RenewResponse = serde_json::from_str(
            r#"{"data": {"access_token": "A", "refresh_token": "R", "expires_in": 900}}"#,
        )
        .unwrap();
        assert_eq!(body.data.access_token, "A");
        assert_eq!(body.data.refresh_token, "R");
    }
}
