//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scan profile: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize scan profile: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value parsed but is out of range or inconsistent.
    #[error("invalid scan profile: {0}")]
    Invalid(String),
}
