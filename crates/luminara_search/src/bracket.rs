//! Coarse bracketing scanner.
//!
//! Samples the separation on a half-step grid and emits one bracket per
//! sampled dip in the deviation from each target. A dip qualifies when its
//! sampled deviation is within `orb × widening`; the widening lets a
//! crossing that falls between samples still be refined.
//!
//! With a very small orb or a very large step a narrow pass between two
//! samples can still be missed. Raising the widening factor trades extra
//! refinement calls for recall.

use log::debug;
use luminara_core::{Body, Ephemeris};
use luminara_time::Epoch;

use crate::angle::separation;
use crate::error::SearchError;
use crate::progress::CancelToken;
use crate::target::{MirrorPolicy, match_target};

/// Time window sampled by the coarse scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    pub start: Epoch,
    pub end: Epoch,
    pub step_seconds: f64,
}

impl ScanWindow {
    pub fn new(start: Epoch, end: Epoch, step_seconds: f64) -> Self {
        Self {
            start,
            end,
            step_seconds,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err("window bounds must be finite");
        }
        if self.start >= self.end {
            return Err("start must be before end");
        }
        if !self.step_seconds.is_finite() || self.step_seconds <= 0.0 {
            return Err("step must be positive");
        }
        Ok(())
    }

    pub fn span_seconds(&self) -> f64 {
        self.end - self.start
    }

    /// Number of coarse steps, the last one possibly partial.
    pub fn step_count(&self) -> usize {
        let steps = self.span_seconds() / self.step_seconds;
        // Absorb float residue so a whole number of steps is not rounded up.
        (steps - 1e-9).ceil().max(1.0) as usize
    }

    /// `(start, mid, end)` of coarse step `i`, clamped to the window.
    fn step_bounds(&self, i: usize) -> (Epoch, Epoch, Epoch) {
        let lo = self.start.add_seconds(i as f64 * self.step_seconds);
        let hi = if i + 1 >= self.step_count() {
            self.end
        } else {
            self.start.add_seconds((i + 1) as f64 * self.step_seconds)
        };
        let mid = lo.add_seconds((hi - lo) / 2.0);
        (lo, mid, hi)
    }
}

/// Interval believed to contain a local minimum of one target's deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub t_lo: Epoch,
    pub t_hi: Epoch,
    pub target_deg: f64,
    /// Sample at the dip and its deviation.
    pub t_sample: Epoch,
    pub sample_deviation_deg: f64,
}

/// Output of the coarse pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketScan {
    /// Ordered by sample time, then by target order.
    pub brackets: Vec<Bracket>,
    /// Number of instants sampled.
    pub samples: usize,
    /// The scan stopped early; brackets cover the sampled prefix only.
    pub cancelled: bool,
}

/// Scan `window` and bracket every sampled dip within `orb × widening`.
#[allow(clippy::too_many_arguments)]
pub fn scan_brackets<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    window: &ScanWindow,
    targets: &[f64],
    orb_deg: f64,
    widening_factor: f64,
    policy: MirrorPolicy,
    cancel: &CancelToken,
) -> Result<BracketScan, SearchError> {
    scan_brackets_observed(
        eph,
        body_a,
        body_b,
        window,
        targets,
        orb_deg * widening_factor,
        policy,
        cancel,
        &mut |_| {},
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn scan_brackets_observed<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    window: &ScanWindow,
    targets: &[f64],
    threshold_deg: f64,
    policy: MirrorPolicy,
    cancel: &CancelToken,
    progress: &mut dyn FnMut(f64),
) -> Result<BracketScan, SearchError> {
    window.validate().map_err(SearchError::InvalidConfig)?;

    let steps = window.step_count();
    let mut times: Vec<Epoch> = Vec::with_capacity(2 * steps + 1);
    let mut seps: Vec<f64> = Vec::with_capacity(2 * steps + 1);
    let mut cancelled = false;

    let sample = |t: Epoch, times: &mut Vec<Epoch>, seps: &mut Vec<f64>| {
        let sep = separation(eph, body_a, body_b, t)?;
        times.push(t);
        seps.push(sep);
        Ok::<(), SearchError>(())
    };

    for i in 0..steps {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        let (lo, mid, hi) = window.step_bounds(i);
        if i == 0 {
            sample(lo, &mut times, &mut seps)?;
        }
        sample(mid, &mut times, &mut seps)?;
        sample(hi, &mut times, &mut seps)?;
        progress((i + 1) as f64 / steps as f64);
    }

    let brackets = find_dips(&times, &seps, targets, threshold_deg, policy);
    debug!(
        "{body_a}-{body_b}: {} samples, {} brackets (threshold {threshold_deg:.4}°)",
        times.len(),
        brackets.len()
    );

    Ok(BracketScan {
        brackets,
        samples: times.len(),
        cancelled,
    })
}

/// Local minima of each target's deviation within `threshold_deg`.
///
/// A sample is a minimum when it is `≤` its left neighbour and `<` its right
/// neighbour, so a flat run yields a single dip at its last sample.
fn find_dips(
    times: &[Epoch],
    seps: &[f64],
    targets: &[f64],
    threshold_deg: f64,
    policy: MirrorPolicy,
) -> Vec<Bracket> {
    let n = times.len();
    if n == 0 {
        return Vec::new();
    }

    let deviations: Vec<Vec<f64>> = targets
        .iter()
        .map(|&t| {
            seps.iter()
                .map(|&s| match_target(s, t, policy).deviation_deg)
                .collect()
        })
        .collect();

    let mut brackets = Vec::new();
    for j in 0..n {
        for (k, &target) in targets.iter().enumerate() {
            let dev = &deviations[k];
            let left_ok = j == 0 || dev[j] <= dev[j - 1];
            let right_ok = j + 1 == n || dev[j] < dev[j + 1];
            if left_ok && right_ok && dev[j] <= threshold_deg {
                brackets.push(Bracket {
                    t_lo: times[j.saturating_sub(1)],
                    t_hi: times[(j + 1).min(n - 1)],
                    target_deg: target,
                    t_sample: times[j],
                    sample_deviation_deg: dev[j],
                });
            }
        }
    }
    brackets
}
