//! Allow/deny policy over a siteverify outcome.

use intake_common::{DecisionReason, VerificationDecision, VerificationResult};

use super::VerifyError;

/// Decide whether a verified token is acceptable.
///
/// Checks run in order and the first failing one names the reason:
/// transport/null response, provider `success`, score against `threshold`
/// (a score equal to the threshold passes), then the expected action.
/// Passing `expected_action = None` gives the boolean-only v2 check plus
/// the score gate.
pub fn decide(
    outcome: &Result<VerificationResult, VerifyError>,
    expected_action: Option<&str>,
    threshold: f64,
) -> VerificationDecision {
    let result = match outcome {
        Ok(result) => result,
        Err(VerifyError::Transport(_)) => {
            return VerificationDecision::deny(DecisionReason::TransportError);
        }
        Err(VerifyError::NullResponse) => {
            return VerificationDecision::deny(DecisionReason::NullResponse);
        }
    };

    if !result.success {
        return VerificationDecision::deny(DecisionReason::RemoteFailure);
    }

    // NaN never reaches >=, so it fails closed too
    match result.score {
        Some(score) if score >= threshold => {}
        _ => return VerificationDecision::deny(DecisionReason::LowScore),
    }

    if let Some(expected) = expected_action {
        if result.action.as_deref() != Some(expected) {
            return VerificationDecision::deny(DecisionReason::ActionMismatch);
        }
    }

    VerificationDecision::allow()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(success: bool, score: Option<f64>, action: Option<&str>) -> Result<VerificationResult, VerifyError> {
        Ok(VerificationResult {
            success,
            score,
            action: action.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_high_score_without_action_is_allowed() {
        let decision = decide(&answer(true, Some(0.9), None), None, 0.5);
        assert_eq!(decision, VerificationDecision::allow());
    }

    #[test]
    fn test_low_score_is_denied() {
        let decision = decide(&answer(true, Some(0.3), Some("submit")), None, 0.5);
        assert_eq!(decision, VerificationDecision::deny(DecisionReason::LowScore));
    }

    #[test]
    fn test_action_mismatch_is_denied() {
        let decision = decide(&answer(true, Some(0.8), Some("login")), Some("submit"), 0.5);
        assert_eq!(decision, VerificationDecision::deny(DecisionReason::ActionMismatch));
    }

    #[test]
    fn test_action_match_is_case_sensitive() {
        let decision = decide(&answer(true, Some(0.8), Some("Submit")), Some("submit"), 0.5);
        assert_eq!(decision.reason, DecisionReason::ActionMismatch);

        let decision = decide(&answer(true, Some(0.8), None), Some("submit"), 0.5);
        assert_eq!(decision.reason, DecisionReason::ActionMismatch);

        let decision = decide(&answer(true, Some(0.8), Some("submit")), Some("submit"), 0.5);
        assert!(decision.allowed);
    }

    #[test]
    fn test_null_response_is_denied() {
        let decision = decide(&Err(VerifyError::NullResponse), None, 0.5);
        assert_eq!(decision, VerificationDecision::deny(DecisionReason::NullResponse));
    }

    #[test]
    fn test_transport_error_is_denied() {
        let outcome = Err(VerifyError::Transport("request timed out".into()));
        let decision = decide(&outcome, Some("submit"), 0.0);
        assert_eq!(decision, VerificationDecision::deny(DecisionReason::TransportError));
    }

    #[test]
    fn test_remote_failure_wins_over_score_and_action() {
        for (score, action) in [
            (Some(1.0), Some("submit")),
            (Some(0.0), Some("login")),
            (None, None),
        ] {
            let decision = decide(&answer(false, score, action), Some("submit"), 0.5);
            assert_eq!(decision, VerificationDecision::deny(DecisionReason::RemoteFailure));
        }
    }

    #[test]
    fn test_missing_score_is_low_score() {
        let decision = decide(&answer(true, None, Some("submit")), None, 0.0);
        assert_eq!(decision.reason, DecisionReason::LowScore);
    }

    #[test]
    fn test_score_gate_across_thresholds() {
        let steps: Vec<f64> = (0..=20).map(|i| f64::from(i) / 20.0).collect();
        for &threshold in &steps {
            for &score in &steps {
                let decision = decide(&answer(true, Some(score), None), None, threshold);
                assert_eq!(
                    decision.allowed,
                    score >= threshold,
                    "score {score} threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_score_equal_to_threshold_passes() {
        let decision = decide(&answer(true, Some(0.5), None), None, 0.5);
        assert!(decision.allowed);

        let decision = decide(&answer(true, Some(0.4999), None), None, 0.5);
        assert!(!decision.allowed);
    }

    #[test]
    fn test_decide_is_idempotent() {
        let outcome = answer(true, Some(0.6), Some("login"));
        let first = decide(&outcome, Some("submit"), 0.5);
        let second = decide(&outcome, Some("submit"), 0.5);
        assert_eq!(first, second);
    }
}
