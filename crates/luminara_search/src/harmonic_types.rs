//! Types for harmonic-angle scans.

use luminara_core::Body;
use luminara_time::Epoch;

use crate::dedup::DedupPolicy;
use crate::refine::RefineParams;
use crate::target::MirrorPolicy;

/// Default search span for [`crate::next_match`] / [`crate::prev_match`].
pub const DEFAULT_MATCH_SEARCH_DAYS: f64 = 200.0;

/// A refined moment when a body pair sits within orb of a target angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub epoch: Epoch,
    pub body_a: Body,
    pub body_b: Body,
    /// Target as requested, normalized to `[0, 360)`.
    pub target_deg: f64,
    /// The arm that matched: `target_deg` or `360 − target_deg`.
    pub matched_deg: f64,
    /// Directional separation `(lon_a − lon_b) mod 360` at `epoch`.
    pub actual_deg: f64,
    /// Unsigned distance between `actual_deg` and `matched_deg`.
    pub deviation_deg: f64,
    /// `actual − matched` in `(-180, 180]`.
    pub signed_delta_deg: f64,
}

impl Hit {
    /// Deviation in arcminutes.
    pub fn deviation_arcmin(&self) -> f64 {
        self.deviation_deg * 60.0
    }
}

/// Tunables for a harmonic scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicConfig {
    /// Maximum accepted deviation, degrees.
    pub orb_deg: f64,
    /// Coarse dips within `orb × widening_factor` are refined.
    pub widening_factor: f64,
    /// Coarse sampling step.
    pub step_minutes: f64,
    pub refine: RefineParams,
    /// Hits of one target closer than this collapse; `None` means two steps.
    pub dedup_gap_seconds: Option<f64>,
    pub dedup_policy: DedupPolicy,
    pub mirror: MirrorPolicy,
    /// Refine brackets on the rayon pool.
    pub parallel: bool,
}

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self {
            orb_deg: 1.0,
            widening_factor: 1.5,
            step_minutes: 60.0,
            refine: RefineParams::default(),
            dedup_gap_seconds: None,
            dedup_policy: DedupPolicy::default(),
            mirror: MirrorPolicy::default(),
            parallel: false,
        }
    }
}

impl HarmonicConfig {
    /// Defaults for single-target next/previous match searches.
    pub fn for_match() -> Self {
        Self {
            orb_deg: 0.5,
            ..Self::default()
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_minutes * 60.0
    }

    /// Dedup gap in seconds, falling back to two coarse steps.
    pub fn effective_dedup_gap(&self) -> f64 {
        self.dedup_gap_seconds
            .unwrap_or_else(|| 2.0 * self.step_seconds())
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.orb_deg.is_finite() || self.orb_deg <= 0.0 {
            return Err("orb_deg must be positive and finite");
        }
        if !self.widening_factor.is_finite() || self.widening_factor < 1.0 {
            return Err("widening_factor must be >= 1");
        }
        if !self.step_minutes.is_finite() || self.step_minutes <= 0.0 {
            return Err("step_minutes must be positive");
        }
        self.refine.validate()?;
        if let Some(gap) = self.dedup_gap_seconds
            && (!gap.is_finite() || gap < 0.0)
        {
            return Err("dedup_gap_seconds must be >= 0");
        }
        Ok(())
    }
}

/// A complete scan request.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicRequest {
    pub body_a: Body,
    pub body_b: Body,
    pub start: Epoch,
    pub end: Epoch,
    pub targets: Vec<f64>,
    pub config: HarmonicConfig,
}

/// Counters describing one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Instants sampled by the coarse pass.
    pub samples: usize,
    pub brackets: usize,
    /// Brackets refined without error.
    pub refined: usize,
    /// Brackets skipped because refinement failed.
    pub refinement_failures: usize,
    /// Refined hits within orb.
    pub accepted: usize,
    /// Accepted hits removed as duplicates.
    pub deduplicated: usize,
}

/// Result of [`crate::scan_harmonics_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicScan {
    /// Ascending by epoch.
    pub hits: Vec<Hit>,
    pub stats: ScanStats,
    /// The scan stopped early; `hits` covers the part that was processed.
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = HarmonicConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.effective_dedup_gap(), 7200.0);
        assert_eq!(c.mirror, MirrorPolicy::Mirrored);
        assert_eq!(c.dedup_policy, DedupPolicy::KeepFirst);
        assert!(!c.parallel);
        assert_eq!(HarmonicConfig::for_match().orb_deg, 0.5);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            HarmonicConfig { orb_deg: 0.0, ..Default::default() },
            HarmonicConfig { orb_deg: f64::NAN, ..Default::default() },
            HarmonicConfig { widening_factor: 0.5, ..Default::default() },
            HarmonicConfig { step_minutes: 0.0, ..Default::default() },
            HarmonicConfig { dedup_gap_seconds: Some(-1.0), ..Default::default() },
            HarmonicConfig {
                refine: RefineParams { max_iterations: 0, ..Default::default() },
                ..Default::default()
            },
        ];
        for c in bad {
            assert!(c.validate().is_err(), "{c:?}");
        }
    }

    #[test]
    fn zero_gap_is_allowed() {
        let c = HarmonicConfig {
            dedup_gap_seconds: Some(0.0),
            ..Default::default()
        };
        assert!(c.validate().is_ok());
        assert_eq!(c.effective_dedup_gap(), 0.0);
    }

    #[test]
    fn arcminutes() {
        let hit = Hit {
            epoch: Epoch::J2000,
            body_a: Body::Sun,
            body_b: Body::Moon,
            target_deg: 90.0,
            matched_deg: 90.0,
            actual_deg: 90.25,
            deviation_deg: 0.25,
            signed_delta_deg: 0.25,
        };
        assert_eq!(hit.deviation_arcmin(), 15.0);
    }
}
