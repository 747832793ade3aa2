//! Error types for lineup noise rule construction.

use thiserror::Error;

/// Errors that can occur while building [`NoiseRules`](super::NoiseRules).
///
/// Extraction itself never fails; only assembling a custom rule set can.
#[derive(Debug, Clone, Error)]
pub enum NoiseRulesError {
    /// The digit-run length must be at least one digit.
    #[error("invalid digit run length {length}: expected at least 1")]
    InvalidDigitRun {
        /// The rejected run length.
        length: usize,
    },

    /// The combined keyword pattern could not be compiled (e.g. size limit exceeded).
    #[error("noise pattern could not be compiled: {reason}")]
    Pattern {
        /// Compiler message from the regex engine.
        reason: String,
    },
}

impl From<regex::Error> for NoiseRulesError {
    fn from(error: regex::Error) -> Self {
        Self::Pattern {
            reason: error.to_string(),
        }
    }
}
