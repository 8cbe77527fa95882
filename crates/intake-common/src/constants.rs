//! Shared constants for intake components.

/// Google reCAPTCHA server-side verification endpoint
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Default minimum acceptable reCAPTCHA score
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

/// Default timeout for the siteverify call (seconds)
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 5;

/// Connect timeout for the siteverify call (seconds)
pub const VERIFY_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Action the intake form mints its v3 tokens for
pub const DEFAULT_EXPECTED_ACTION: &str = "submit";

/// Score reported by the score lookup when no score is available
pub const NO_SCORE: f64 = -1.0;

/// Default Redis connection URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Whole-request timeout applied by the router (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Message shown to the user for any verification denial
pub const REJECTION_MESSAGE: &str =
    "reCAPTCHA validation failed. You appear to be a bot. Please try again.";

/// Redis key layout for the employee store
pub mod redis_keys {
    /// Identity counter (INCR)
    pub const NEXT_ID: &str = "employee:next_id";

    /// Set of all stored employee ids
    pub const ID_SET: &str = "employee:ids";

    /// Employee record: employee:{id}
    pub const EMPLOYEE_PREFIX: &str = "employee:";
}

/// Form field names of the siteverify request
pub mod form_fields {
    /// Wire field carrying the server secret
    pub const SECRET: &str = "secret";

    /// Wire field carrying the client token
    pub const RESPONSE: &str = "response";
}
