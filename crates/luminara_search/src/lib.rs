//! Harmonic-angle search for body pairs.
//!
//! This crate provides:
//! - Angle function: longitudes and directional pair separations
//! - Target matching with optional mirrored arms (`t` and `360 − t`)
//! - Coarse bracketing over a time window
//! - Bisection and golden-section refinement inside brackets
//! - Per-target deduplication of refined hits
//! - A scan orchestrator with progress, cancellation and parallel refinement
//! - Next/previous match of a single target from an anchor time

pub mod angle;
pub mod bracket;
pub mod dedup;
pub mod error;
pub mod harmonic;
pub mod harmonic_types;
pub mod progress;
pub mod refine;
pub mod target;

pub use angle::{circular_distance, longitude, normalize_360, normalize_to_pm180, separation};
pub use bracket::{Bracket, BracketScan, ScanWindow, scan_brackets};
pub use dedup::{DedupPolicy, dedupe};
pub use error::{RefineError, SearchError};
pub use harmonic::{next_match, prev_match, scan_harmonics, scan_harmonics_with};
pub use harmonic_types::{
    DEFAULT_MATCH_SEARCH_DAYS, HarmonicConfig, HarmonicRequest, HarmonicScan, Hit, ScanStats,
};
pub use progress::{CancelToken, ScanObserver};
pub use refine::{RefineParams, RefineStrategy, Refined, refine};
pub use target::{MirrorPolicy, TargetMatch, TargetSet, match_target, nearest};
