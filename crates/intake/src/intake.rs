//! Record intake: verify the submission, then persist it.

use intake_common::{DecisionReason, EmployeeRecord, IntakeError, NewEmployee};
use std::sync::Arc;

use crate::recaptcha::RecaptchaVerifier;
use crate::store::EmployeeStore;

/// Result of a single submission
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// Verification passed and the store assigned an identity
    Created(EmployeeRecord),
    /// Verification denied; nothing was stored
    Rejected(DecisionReason),
}

/// Orchestrates verification and persistence for employee submissions
pub struct IntakeHandler {
    verifier: Arc<RecaptchaVerifier>,
    store: EmployeeStore,
}

impl IntakeHandler {
    pub fn new(verifier: Arc<RecaptchaVerifier>, store: EmployeeStore) -> Self {
        Self { verifier, store }
    }

    /// Verify `token` and, only if allowed, create the employee.
    ///
    /// No retries: a denied token is final for this submission, the user
    /// must resubmit with a fresh one. Errors only come from the store.
    pub async fn submit(
        &self,
        token: &str,
        expected_action: Option<&str>,
        employee: NewEmployee,
    ) -> Result<IntakeOutcome, IntakeError> {
        let decision = self.verifier.validate(token, expected_action).await;

        if !decision.allowed {
            tracing::info!(reason = %decision.reason, "Submission rejected");
            return Ok(IntakeOutcome::Rejected(decision.reason));
        }

        let record = self.store.create(employee).await?;
        tracing::info!(employee_id = record.id, "Employee created");

        Ok(IntakeOutcome::Created(record))
    }
}
