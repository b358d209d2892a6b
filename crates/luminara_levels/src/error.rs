//! Level projection errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LevelsError {
    #[error("anchor price must be positive and finite, got {0}")]
    InvalidAnchor(f64),
    /// A percent entry could not be parsed or is negative.
    #[error("invalid percent {input:?}: {reason}")]
    InvalidPercent { input: String, reason: &'static str },
    #[error("invalid ladder: {0}")]
    InvalidLadder(&'static str),
}
