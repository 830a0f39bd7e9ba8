//! Candidate validation: extract each candidate's documentation span, structure it, and
//! escalate to backup candidates when the primary result disappoints.

pub mod error;
pub mod types;
pub mod validator;

#[cfg(test)]
mod tests;

pub use error::{ValidationError, ValidationResult};
pub use types::{
    AttemptOutcome, EndpointSummary, StructuringMode, ValidatedResult, ValidationAttempt,
    ValidationConfig, ValidationReport,
};
pub use validator::CandidateValidator;
