//! Application state and shared resources.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::intake::IntakeHandler;
use crate::recaptcha::RecaptchaVerifier;
use crate::store::{EmployeeStore, RedisStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (read-only)
    pub config: Arc<AppConfig>,

    /// Employee store handle
    pub store: EmployeeStore,

    /// reCAPTCHA verifier
    pub verifier: Arc<RecaptchaVerifier>,

    /// Submission orchestration
    pub intake: Arc<IntakeHandler>,
}

impl AppState {
    /// Create new application state, connecting the configured store
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = match config.store {
            StoreBackend::Memory => EmployeeStore::memory(),
            StoreBackend::Redis => {
                let store = RedisStore::connect(&config.redis_url).await?;
                tracing::info!(redis_url = %config.redis_url, "Redis connected");
                EmployeeStore::Redis(store)
            }
        };

        let verifier = Arc::new(RecaptchaVerifier::new(&config.recaptcha)?);

        Ok(Self::from_parts(config, store, verifier))
    }

    pub fn from_parts(config: AppConfig, store: EmployeeStore, verifier: Arc<RecaptchaVerifier>) -> Self {
        let intake = Arc::new(IntakeHandler::new(verifier.clone(), store.clone()));

        Self {
            config: Arc::new(config),
            store,
            verifier,
            intake,
        }
    }

    /// Action the intake form's tokens must carry
    pub fn expected_action(&self) -> Option<&str> {
        self.config.recaptcha.expected_action()
    }
}
