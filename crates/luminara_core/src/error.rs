//! Engine error type.

use thiserror::Error;

/// Core engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    /// An external body identifier did not resolve to a [`crate::Body`].
    #[error("unknown body: {0}")]
    UnknownBody(String),
    #[error("epoch out of range: JD {jd_utc} (UTC)")]
    EpochOutOfRange { jd_utc: f64 },
    #[error("internal error: {0}")]
    Internal(String),
}
