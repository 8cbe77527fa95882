//! Core types shared across intake components.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Read an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parsed body of a reCAPTCHA `siteverify` response.
///
/// Every field is optional on the wire. A missing or `null` `success`
/// reads as `false`, everything else as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the provider accepted the token
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// v3 score in [0, 1] (absent for v2 tokens)
    #[serde(default)]
    pub score: Option<f64>,

    /// Action the token was minted for
    #[serde(default)]
    pub action: Option<String>,

    /// ISO timestamp of the challenge load
    #[serde(default)]
    pub challenge_ts: Option<String>,

    /// Hostname of the site where the challenge was solved
    #[serde(default)]
    pub hostname: Option<String>,

    /// Provider diagnostics (e.g. `invalid-input-response`)
    #[serde(
        default,
        rename = "error-codes",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub error_codes: Vec<String>,
}

/// Why a verification was allowed or denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionReason {
    Ok,
    /// Provider reported `success = false`
    RemoteFailure,
    /// Provider reachable but body empty or unparseable
    NullResponse,
    /// Score absent or below threshold
    LowScore,
    /// Token minted for a different action
    ActionMismatch,
    /// Provider unreachable (timeout, DNS, refused, bad status)
    TransportError,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::RemoteFailure => "remote-failure",
            Self::NullResponse => "null-response",
            Self::LowScore => "low-score",
            Self::ActionMismatch => "action-mismatch",
            Self::TransportError => "transport-error",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allow/deny outcome of the verification policy. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl VerificationDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Ok,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Employee fields as submitted, before the store assigns an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

/// A persisted employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Identity assigned by the store
    pub id: u64,
    pub name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

impl EmployeeRecord {
    pub fn from_new(id: u64, employee: NewEmployee) -> Self {
        Self {
            id,
            name: employee.name,
            last_name: employee.last_name,
            date_of_birth: employee.date_of_birth,
        }
    }
}
