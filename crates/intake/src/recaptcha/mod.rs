//! reCAPTCHA verification.
//!
//! `client` talks to the provider, `policy` turns its answer into an
//! allow/deny decision, and [`RecaptchaVerifier`] ties the two together
//! with the configured threshold.

mod client;
mod policy;
#[cfg(test)]
pub(crate) mod stub;

pub use client::{VerificationClient, VerifyError};
pub use policy::decide;

use anyhow::{Context, Result};
use intake_common::VerificationDecision;
use std::time::Duration;

use crate::config::RecaptchaConfig;

/// Verification service shared by all requests
pub struct RecaptchaVerifier {
    /// `None` when verification is disabled
    client: Option<VerificationClient>,
    /// Minimum acceptable score
    threshold: f64,
}

impl RecaptchaVerifier {
    pub fn new(config: &RecaptchaConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled(config.threshold));
        }

        let client = VerificationClient::with_timeout(
            config.verify_url.clone(),
            config.secret_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .context("Failed to build verification HTTP client")?;

        Ok(Self::with_client(client, config.threshold))
    }

    pub fn with_client(client: VerificationClient, threshold: f64) -> Self {
        Self {
            client: Some(client),
            threshold,
        }
    }

    /// A verifier that allows everything without calling the provider.
    pub fn disabled(threshold: f64) -> Self {
        Self {
            client: None,
            threshold,
        }
    }

    /// Verify `token` and apply the policy.
    ///
    /// Never fails: every provider problem becomes a denial.
    pub async fn validate(&self, token: &str, expected_action: Option<&str>) -> VerificationDecision {
        let Some(client) = &self.client else {
            tracing::debug!("reCAPTCHA disabled, allowing submission");
            return VerificationDecision::allow();
        };

        let outcome = client.verify(token).await;
        match &outcome {
            Ok(result) => tracing::info!(
                success = result.success,
                score = ?result.score,
                action = ?result.action,
                hostname = ?result.hostname,
                error_codes = ?result.error_codes,
                "reCAPTCHA validation result"
            ),
            Err(e) => tracing::error!(error = %e, "Error validating reCAPTCHA"),
        }

        let decision = decide(&outcome, expected_action, self.threshold);
        if !decision.allowed {
            tracing::warn!(
                reason = %decision.reason,
                threshold = self.threshold,
                expected_action = ?expected_action,
                "reCAPTCHA verification denied"
            );
        }

        decision
    }

    /// Provider score for `token`, if the provider accepted it and sent one.
    pub async fn score(&self, token: &str) -> Option<f64> {
        let client = self.client.as_ref()?;

        match client.verify(token).await {
            Ok(result) if result.success => result.score,
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "Error getting reCAPTCHA score");
                None
            }
        }
    }
}
