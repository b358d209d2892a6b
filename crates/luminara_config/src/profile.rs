//! Scan profile sections and their conversion into engine and search
//! configuration.

use luminara_core::EngineConfig;
use luminara_levels::{DEFAULT_PERCENTS, DEFAULT_ROOT_STEP, DEFAULT_TURNS};
use luminara_search::{
    DEFAULT_MATCH_SEARCH_DAYS, DedupPolicy, HarmonicConfig, MirrorPolicy, RefineParams,
    RefineStrategy, TargetSet,
};
use luminara_time::UtcTime;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete scan profile as stored in TOML.
///
/// Every field has a default, so an empty file is a valid profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanProfile {
    pub scan: ScanSection,
    pub refine: RefineSection,
    pub dedup: DedupSection,
    pub engine: EngineSection,
    pub levels: LevelsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    /// Targets used when a command does not name its own.
    pub targets: Vec<f64>,
    pub orb_deg: f64,
    pub widening_factor: f64,
    pub step_minutes: f64,
    pub mirror: MirrorMode,
    pub parallel: bool,
    /// Orb for next/previous match searches.
    pub match_orb_deg: f64,
    pub match_search_days: f64,
}

impl Default for ScanSection {
    fn default() -> Self {
        let search = HarmonicConfig::default();
        Self {
            targets: vec![0.0, 90.0, 180.0],
            orb_deg: search.orb_deg,
            widening_factor: search.widening_factor,
            step_minutes: search.step_minutes,
            mirror: MirrorMode::Mirrored,
            parallel: search.parallel,
            match_orb_deg: HarmonicConfig::for_match().orb_deg,
            match_search_days: DEFAULT_MATCH_SEARCH_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorMode {
    Mirrored,
    Exact,
}

impl From<MirrorMode> for MirrorPolicy {
    fn from(mode: MirrorMode) -> Self {
        match mode {
            MirrorMode::Mirrored => MirrorPolicy::Mirrored,
            MirrorMode::Exact => MirrorPolicy::Exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefineSection {
    pub strategy: StrategyName,
    pub max_iterations: u32,
    pub time_tolerance_seconds: f64,
}

impl Default for RefineSection {
    fn default() -> Self {
        let params = RefineParams::default();
        Self {
            strategy: StrategyName::Golden,
            max_iterations: params.max_iterations,
            time_tolerance_seconds: params.time_tolerance_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    Bisection,
    Golden,
}

impl From<StrategyName> for RefineStrategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Bisection => RefineStrategy::Bisection,
            StrategyName::Golden => RefineStrategy::GoldenSection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DedupSection {
    pub policy: DedupMode,
    /// Minimum gap between kept hits of one target; two coarse steps when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_seconds: Option<f64>,
}

impl Default for DedupSection {
    fn default() -> Self {
        Self {
            policy: DedupMode::KeepFirst,
            gap_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupMode {
    KeepFirst,
    KeepBest,
}

impl From<DedupMode> for DedupPolicy {
    fn from(mode: DedupMode) -> Self {
        match mode {
            DedupMode::KeepFirst => DedupPolicy::KeepFirst,
            DedupMode::KeepBest => DedupPolicy::KeepBest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// UTC date or date-time, e.g. `"1800-01-01"`.
    pub valid_from: String,
    pub valid_to: String,
    pub light_time: bool,
    pub aberration: bool,
    pub nutation: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            valid_from: date_string(&engine.valid_from),
            valid_to: date_string(&engine.valid_to),
            light_time: engine.light_time,
            aberration: engine.aberration,
            nutation: engine.nutation,
        }
    }
}

fn date_string(t: &UtcTime) -> String {
    format!("{:04}-{:02}-{:02}", t.year, t.month, t.day)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelsSection {
    pub percents: Vec<f64>,
    pub root_step: f64,
    pub turns: u32,
}

impl Default for LevelsSection {
    fn default() -> Self {
        Self {
            percents: DEFAULT_PERCENTS.to_vec(),
            root_step: DEFAULT_ROOT_STEP,
            turns: DEFAULT_TURNS,
        }
    }
}

impl ScanProfile {
    /// Check every section without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.harmonic_config()?;
        self.match_config()?;
        self.engine_config()?;
        self.default_targets()?;
        let levels = &self.levels;
        if levels.percents.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(invalid("levels.percents must be non-negative numbers"));
        }
        if !levels.root_step.is_finite() || levels.root_step <= 0.0 {
            return Err(invalid("levels.root_step must be positive"));
        }
        if levels.turns == 0 {
            return Err(invalid("levels.turns must be at least 1"));
        }
        if !self.scan.match_search_days.is_finite() || self.scan.match_search_days <= 0.0 {
            return Err(invalid("scan.match_search_days must be positive"));
        }
        Ok(())
    }

    /// Search configuration for range scans.
    pub fn harmonic_config(&self) -> Result<HarmonicConfig, ConfigError> {
        self.search_config(self.scan.orb_deg)
    }

    /// Search configuration for next/previous match.
    pub fn match_config(&self) -> Result<HarmonicConfig, ConfigError> {
        self.search_config(self.scan.match_orb_deg)
    }

    fn search_config(&self, orb_deg: f64) -> Result<HarmonicConfig, ConfigError> {
        let config = HarmonicConfig {
            orb_deg,
            widening_factor: self.scan.widening_factor,
            step_minutes: self.scan.step_minutes,
            refine: RefineParams {
                strategy: self.refine.strategy.into(),
                max_iterations: self.refine.max_iterations,
                time_tolerance_seconds: self.refine.time_tolerance_seconds,
            },
            dedup_gap_seconds: self.dedup.gap_seconds,
            dedup_policy: self.dedup.policy.into(),
            mirror: self.scan.mirror.into(),
            parallel: self.scan.parallel,
        };
        config.validate().map_err(invalid)?;
        Ok(config)
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<UtcTime>()
                .map_err(|e| ConfigError::Invalid(format!("engine.{field}: {e}")))
        };
        let config = EngineConfig {
            valid_from: parse("valid_from", &self.engine.valid_from)?,
            valid_to: parse("valid_to", &self.engine.valid_to)?,
            light_time: self.engine.light_time,
            aberration: self.engine.aberration,
            nutation: self.engine.nutation,
        };
        config
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config)
    }

    /// Normalized `scan.targets`.
    pub fn default_targets(&self) -> Result<TargetSet, ConfigError> {
        TargetSet::new(&self.scan.targets).map_err(invalid)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
