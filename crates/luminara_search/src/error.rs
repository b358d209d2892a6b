//! Error types for harmonic searches.

use luminara_core::EngineError;
use luminara_time::UtcTime;
use thiserror::Error;

/// Errors that abort a search.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A request or configuration value was rejected before any ephemeris
    /// call was made.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The ephemeris could not answer for an instant the coarse pass needed.
    #[error("ephemeris failed at {epoch}: {source}")]
    Ephemeris {
        epoch: UtcTime,
        #[source]
        source: EngineError,
    },
}

/// Failure while refining a single bracket.
///
/// Not fatal to a scan: the orchestrator logs it and skips the bracket.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RefineError {
    #[error("ephemeris failed at {epoch} during refinement: {source}")]
    Ephemeris {
        epoch: UtcTime,
        #[source]
        source: EngineError,
    },
    #[error("non-finite deviation at {epoch}")]
    NonFinite { epoch: UtcTime },
}
