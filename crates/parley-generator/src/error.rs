//! Error types for the Generator

use parley_gatekeeper::ConformanceError;
use thiserror::Error;

/// Errors that can occur while generating a record
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The provider did not answer within the configured time
    #[error("Generation timeout after {0}s")]
    Timeout(u64),

    /// Every attempt produced a non-conforming analysis
    #[error("Retries exhausted after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Rejection of the final attempt
        last: ConformanceError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeneratorError {
    /// The final rejection, when generation ran out of attempts
    pub fn rejection(&self) -> Option<&ConformanceError> {
        match self {
            GeneratorError::RetriesExhausted { last, .. } => Some(last),
            _ => None,
        }
    }
}
