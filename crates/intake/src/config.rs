//! Configuration management for the intake service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use intake_common::IntakeError;
use intake_common::constants::{
    DEFAULT_EXPECTED_ACTION, DEFAULT_LISTEN_ADDR, DEFAULT_REDIS_URL, DEFAULT_SCORE_THRESHOLD,
    DEFAULT_VERIFY_TIMEOUT_SECS, RECAPTCHA_VERIFY_URL,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Employee store backend
    #[serde(default)]
    pub store: StoreBackend,

    /// Redis connection URL (redis backend only)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// reCAPTCHA configuration
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
}

/// Where employee records live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// Redis via connection manager
    Redis,
}

/// reCAPTCHA settings. Read-only after start-up.
#[derive(Clone, Deserialize)]
pub struct RecaptchaConfig {
    /// Verify submissions at all (disable for local development only)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Server-side secret key, never sent to the browser
    #[serde(default)]
    pub secret_key: String,

    /// Public site key rendered into the form
    #[serde(default)]
    pub site_key: String,

    /// Minimum acceptable score (0.0 - 1.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Verification endpoint
    #[serde(default = "default_verify_url")]
    pub verify_url: String,

    /// Timeout for the verification call in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Action the form's tokens must carry; empty for the boolean-only v2 check
    #[serde(default = "default_expected_action")]
    pub expected_action: String,
}

impl RecaptchaConfig {
    /// Expected action, or `None` for the boolean-only check
    pub fn expected_action(&self) -> Option<&str> {
        Some(self.expected_action.as_str()).filter(|a| !a.is_empty())
    }

    pub fn validate(&self) -> Result<(), IntakeError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(IntakeError::Config(format!(
                "recaptcha.threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.enabled && self.secret_key.trim().is_empty() {
            return Err(IntakeError::Config(
                "recaptcha.secret_key is required when verification is enabled".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(IntakeError::Config(
                "recaptcha.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            secret_key: String::new(),
            site_key: String::new(),
            threshold: default_threshold(),
            verify_url: default_verify_url(),
            timeout_secs: default_timeout(),
            expected_action: default_expected_action(),
        }
    }
}

impl fmt::Debug for RecaptchaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecaptchaConfig")
            .field("enabled", &self.enabled)
            .field("secret_key", &"<redacted>")
            .field("site_key", &self.site_key)
            .field("threshold", &self.threshold)
            .field("verify_url", &self.verify_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("expected_action", &self.expected_action)
            .finish()
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_redis_url() -> String { DEFAULT_REDIS_URL.to_string() }
fn default_true() -> bool { true }
fn default_threshold() -> f64 { DEFAULT_SCORE_THRESHOLD }
fn default_verify_url() -> String { RECAPTCHA_VERIFY_URL.to_string() }
fn default_timeout() -> u64 { DEFAULT_VERIFY_TIMEOUT_SECS }
fn default_expected_action() -> String { DEFAULT_EXPECTED_ACTION.to_string() }

impl AppConfig {
    /// Load configuration from file, with CLI/env overrides, then validate
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(args);
        config.recaptcha.validate()?;

        if !config.recaptcha.enabled {
            tracing::warn!("reCAPTCHA verification is DISABLED, every submission will be accepted");
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, args: &super::Args) {
        if let Some(ref listen) = args.listen {
            self.listen_addr = listen.clone();
        }
        if let Some(store) = args.store {
            self.store = store;
        }
        if let Some(ref redis_url) = args.redis_url {
            self.redis_url = redis_url.clone();
        }
        if let Some(ref secret_key) = args.secret_key {
            self.recaptcha.secret_key = secret_key.clone();
        }
        if let Some(ref site_key) = args.site_key {
            self.recaptcha.site_key = site_key.clone();
        }
        if let Some(threshold) = args.threshold {
            self.recaptcha.threshold = threshold;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            store: StoreBackend::default(),
            redis_url: default_redis_url(),
            recaptcha: RecaptchaConfig::default(),
        }
    }
}
