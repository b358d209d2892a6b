//! Error types for calendar parsing and validation.

use thiserror::Error;

/// Errors from parsing or validating UTC calendar values.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Text did not match any accepted date/time layout.
    #[error("cannot parse '{input}' as UTC date/time: {reason}")]
    Parse { input: String, reason: String },
    /// A calendar field is out of range.
    #[error("invalid calendar value: {0}")]
    InvalidCalendar(&'static str),
}
