//! TOML scan profiles.
//!
//! A profile is looked up in order: an explicit path, the file named by
//! `LUMINARA_CONFIG`, then built-in defaults. Every field is optional.
//!
//! ```toml
//! [scan]
//! targets = [0.0, 90.0, 180.0]
//! orb_deg = 1.0
//! step_minutes = 60.0
//! mirror = "mirrored"
//!
//! [refine]
//! strategy = "golden"
//!
//! [dedup]
//! policy = "keep_best"
//! gap_seconds = 7200.0
//! ```

pub mod error;
pub mod profile;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub use error::ConfigError;
pub use profile::{
    DedupMode, DedupSection, EngineSection, LevelsSection, MirrorMode, RefineSection, ScanProfile,
    ScanSection, StrategyName,
};

/// Environment variable naming a profile file.
pub const CONFIG_ENV: &str = "LUMINARA_CONFIG";

impl ScanProfile {
    /// Parse and validate a profile from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let profile: ScanProfile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&text)?;
        info!("loaded scan profile from {}", path.display());
        Ok(profile)
    }

    /// Profile named by `LUMINARA_CONFIG`, if the variable is set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_env_value(std::env::var_os(CONFIG_ENV))
    }

    /// Explicit path, else `LUMINARA_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, std::env::var_os(CONFIG_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Result<Option<Self>, ConfigError> {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => Self::from_path(&PathBuf::from(v)).map(Some),
            None => Ok(None),
        }
    }

    fn load_with_env(explicit: Option<&Path>, env: Option<OsString>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        if let Some(profile) = Self::from_env_value(env)? {
            return Ok(profile);
        }
        debug!("no scan profile given; using defaults");
        Ok(Self::default())
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
