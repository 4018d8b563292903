//! Notation parsing errors

use parley_domain::RegistryError;
use thiserror::Error;

/// Errors raised when reading a notation line back into values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A glyph did not belong to the family expected at that position
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The line ended before a required segment
    #[error("missing {0}")]
    MissingSegment(&'static str),

    /// A quoted string was never closed
    #[error("unterminated quoted text")]
    UnterminatedQuote,

    /// The line has the wrong shape
    #[error("malformed notation line '{line}': {reason}")]
    Malformed {
        /// Offending line
        line: String,
        /// What was wrong
        reason: String,
    },
}

impl NotationError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        NotationError::Malformed {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
