//! HTTP client for the reCAPTCHA `siteverify` endpoint.

use intake_common::VerificationResult;
use intake_common::constants::{VERIFY_CONNECT_TIMEOUT_SECS, form_fields};
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a usable answer from the verification provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Timeout, DNS failure, refused connection, or non-2xx status
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with an empty or unparseable body
    #[error("verification provider returned an empty or unparseable body")]
    NullResponse,
}

/// Client for the verification provider.
///
/// Sends `POST {verify_url}` with form fields `secret` and `response` and
/// parses the JSON answer.
pub struct VerificationClient {
    /// HTTP client (reusable connection pool)
    http: reqwest::Client,
    verify_url: String,
    secret_key: String,
}

impl VerificationClient {
    /// Create a client whose whole request is bounded by `timeout`.
    pub fn with_timeout(
        verify_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(VERIFY_CONNECT_TIMEOUT_SECS).min(timeout))
            .build()?;

        Ok(Self {
            http,
            verify_url: verify_url.into(),
            secret_key: secret_key.into(),
        })
    }

    /// Verify a client token with the provider.
    ///
    /// Empty tokens are sent as-is; the provider rejects them.
    pub async fn verify(&self, token: &str) -> Result<VerificationResult, VerifyError> {
        let params = [
            (form_fields::SECRET, self.secret_key.as_str()),
            (form_fields::RESPONSE, token),
        ];

        let response = self
            .http
            .post(&self.verify_url)
            .form(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::Transport(format!("HTTP status {status}")));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        parse_body(&body)
    }
}

fn transport_error(e: reqwest::Error) -> VerifyError {
    if e.is_timeout() {
        VerifyError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        VerifyError::Transport(format!("connection failed: {e}"))
    } else {
        VerifyError::Transport(e.to_string())
    }
}

fn parse_body(body: &[u8]) -> Result<VerificationResult, VerifyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(VerifyError::NullResponse);
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Unparseable siteverify body");
        VerifyError::NullResponse
    })
}
