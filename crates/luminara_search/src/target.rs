//! Target matcher: which harmonic angle a separation is closest to.

use crate::angle::{circular_distance, normalize_360, normalize_to_pm180};

/// How a target angle matches a directional separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorPolicy {
    /// Target `t` also matches `360 − t`, so a waxing and a waning
    /// square both count as 90°.
    #[default]
    Mirrored,
    /// Target matches the directional separation only.
    Exact,
}

/// Result of comparing one separation against one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMatch {
    /// Target as configured, normalized to `[0, 360)`.
    pub target_deg: f64,
    /// The arm that matched: `target_deg` or its mirror `360 − target_deg`.
    pub matched_deg: f64,
    /// Unsigned distance to the matched arm, `[0, 180]`.
    pub deviation_deg: f64,
    /// `separation − matched` in `(-180, 180]`; positive means the
    /// separation is past the target in the direction of increasing angle.
    pub signed_delta_deg: f64,
}

/// Deduplicated, order-preserving set of target angles in `[0, 360)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSet {
    targets: Vec<f64>,
}

impl TargetSet {
    /// Normalize and deduplicate `targets`, keeping first occurrences.
    pub fn new(targets: &[f64]) -> Result<Self, &'static str> {
        if targets.is_empty() {
            return Err("targets must not be empty");
        }
        if targets.iter().any(|t| !t.is_finite()) {
            return Err("targets must be finite");
        }
        let mut out: Vec<f64> = Vec::with_capacity(targets.len());
        for &t in targets {
            let t = normalize_360(t);
            if !out.iter().any(|&seen| seen == t) {
                out.push(t);
            }
        }
        Ok(Self { targets: out })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Position of `target_deg` in caller order.
    pub fn index_of(&self, target_deg: f64) -> Option<usize> {
        self.targets.iter().position(|&t| t == target_deg)
    }
}

/// Compare `angle` against a single target.
pub fn match_target(angle: f64, target: f64, policy: MirrorPolicy) -> TargetMatch {
    let target = normalize_360(target);
    let direct = circular_distance(angle, target);
    let (matched, deviation) = match policy {
        MirrorPolicy::Exact => (target, direct),
        MirrorPolicy::Mirrored => {
            let mirror = normalize_360(360.0 - target);
            let mirrored = circular_distance(angle, mirror);
            // Ties go to the target arm.
            if mirrored < direct {
                (mirror, mirrored)
            } else {
                (target, direct)
            }
        }
    };
    TargetMatch {
        target_deg: target,
        matched_deg: matched,
        deviation_deg: deviation,
        signed_delta_deg: normalize_to_pm180(angle - matched),
    }
}

/// Nearest target to `angle`; ties go to the earlier target in `targets`.
///
/// Returns `None` only when `targets` is empty.
pub fn nearest(angle: f64, targets: &[f64], policy: MirrorPolicy) -> Option<TargetMatch> {
    let mut best: Option<TargetMatch> = None;
    for &t in targets {
        let m = match_target(angle, t, policy);
        match best {
            Some(b) if b.deviation_deg <= m.deviation_deg => {}
            _ => best = Some(m),
        }
    }
    best
}
