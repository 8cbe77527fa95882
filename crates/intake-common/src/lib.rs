//! # Intake Common
//!
//! Shared types, errors, and constants used across intake components.
//!
//! ## Modules
//! - `types` - Core data structures (VerificationResult, EmployeeRecord, etc.)
//! - `error` - Common error types
//! - `constants` - Shared configuration constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::IntakeError;
pub use types::*;
