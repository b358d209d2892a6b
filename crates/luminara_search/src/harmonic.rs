//! Harmonic-angle scan orchestrator.
//!
//! Pipeline: validate → coarse bracketing → refinement (sequential or on
//! the rayon pool) → orb filter → dedup → ascending sort. Validation runs
//! before any ephemeris call, so a rejected request never touches the
//! provider.

use log::{debug, info, warn};
use luminara_core::{Body, Ephemeris};
use luminara_time::Epoch;
use rayon::prelude::*;

use crate::angle::raw_separation;
use crate::bracket::{Bracket, ScanWindow, scan_brackets_observed};
use crate::dedup::dedupe;
use crate::error::{RefineError, SearchError};
use crate::harmonic_types::{HarmonicConfig, HarmonicRequest, HarmonicScan, Hit, ScanStats};
use crate::progress::{CancelToken, ScanObserver};
use crate::refine::refine;
use crate::target::{TargetSet, match_target};

/// Share of progress reported for the coarse pass; refinement gets the rest.
const COARSE_SHARE: f64 = 0.5;

/// Find every time in `[start, end]` when `body_a − body_b` is within orb
/// of one of `targets`.
pub fn scan_harmonics<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    start: Epoch,
    end: Epoch,
    targets: &[f64],
    config: &HarmonicConfig,
) -> Result<Vec<Hit>, SearchError> {
    let request = HarmonicRequest {
        body_a,
        body_b,
        start,
        end,
        targets: targets.to_vec(),
        config: *config,
    };
    scan_harmonics_with(eph, &request, None, &CancelToken::new()).map(|scan| scan.hits)
}

/// Full-form scan with progress reporting, cancellation and statistics.
///
/// A cancelled scan returns `Ok` with `cancelled = true` and the hits
/// refined before cancellation was observed.
pub fn scan_harmonics_with<E: Ephemeris + ?Sized>(
    eph: &E,
    request: &HarmonicRequest,
    mut observer: Option<&mut dyn ScanObserver>,
    cancel: &CancelToken,
) -> Result<HarmonicScan, SearchError> {
    let config = &request.config;
    let (body_a, body_b) = (request.body_a, request.body_b);
    if body_a == body_b {
        return Err(SearchError::InvalidConfig("body_a and body_b must differ"));
    }
    let targets = TargetSet::new(&request.targets).map_err(SearchError::InvalidConfig)?;
    config.validate().map_err(SearchError::InvalidConfig)?;
    let window = ScanWindow::new(request.start, request.end, config.step_seconds());
    window.validate().map_err(SearchError::InvalidConfig)?;

    let mut report = |fraction: f64, hits: usize| {
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_progress(fraction.clamp(0.0, 1.0), hits);
        }
    };

    let coarse = scan_brackets_observed(
        eph,
        body_a,
        body_b,
        &window,
        targets.as_slice(),
        config.orb_deg * config.widening_factor,
        config.mirror,
        cancel,
        &mut |f| report(COARSE_SHARE * f, 0),
    )?;

    let mut stats = ScanStats {
        samples: coarse.samples,
        brackets: coarse.brackets.len(),
        ..ScanStats::default()
    };
    let mut cancelled = coarse.cancelled;

    let outcomes: Vec<Option<Result<Hit, RefineError>>> = if config.parallel {
        coarse
            .brackets
            .par_iter()
            .map(|b| (!cancel.is_cancelled()).then(|| refine_bracket(eph, body_a, body_b, b, config)))
            .collect()
    } else {
        let total = coarse.brackets.len().max(1) as f64;
        let mut results = Vec::with_capacity(coarse.brackets.len());
        let mut within_orb = 0;
        for (i, b) in coarse.brackets.iter().enumerate() {
            if cancel.is_cancelled() {
                results.push(None);
                continue;
            }
            let outcome = refine_bracket(eph, body_a, body_b, b, config);
            if matches!(&outcome, Ok(hit) if hit.deviation_deg <= config.orb_deg) {
                within_orb += 1;
            }
            results.push(Some(outcome));
            report(COARSE_SHARE + (1.0 - COARSE_SHARE) * (i + 1) as f64 / total, within_orb);
        }
        results
    };

    let mut accepted = Vec::new();
    for (bracket, outcome) in coarse.brackets.iter().zip(outcomes) {
        match outcome {
            None => cancelled = true,
            Some(Err(e)) => {
                stats.refinement_failures += 1;
                warn!(
                    "skipping {body_a}-{body_b} bracket for {}° at {}: {e}",
                    bracket.target_deg,
                    bracket.t_sample
                );
            }
            Some(Ok(hit)) => {
                stats.refined += 1;
                if hit.deviation_deg <= config.orb_deg {
                    accepted.push(hit);
                } else {
                    debug!(
                        "discarding {}° candidate at {}: deviation {:.4}° > orb",
                        hit.target_deg, hit.epoch, hit.deviation_deg
                    );
                }
            }
        }
    }
    stats.accepted = accepted.len();

    let hits = dedupe(accepted, config.effective_dedup_gap(), config.dedup_policy);
    stats.deduplicated = stats.accepted - hits.len();

    if cancelled {
        warn!(
            "{body_a}-{body_b} scan cancelled after {} samples; returning {} hits",
            stats.samples,
            hits.len()
        );
    } else {
        report(1.0, hits.len());
    }
    info!(
        "{body_a}-{body_b} scan {} .. {}: {} hits ({} brackets, {} refined, {} failed, {} duplicates)",
        request.start,
        request.end,
        hits.len(),
        stats.brackets,
        stats.refined,
        stats.refinement_failures,
        stats.deduplicated
    );

    Ok(HarmonicScan {
        hits,
        stats,
        cancelled,
    })
}

/// Refine one bracket and describe the refined instant as a [`Hit`].
fn refine_bracket<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    bracket: &Bracket,
    config: &HarmonicConfig,
) -> Result<Hit, RefineError> {
    let target = bracket.target_deg;
    let deviation = |t: Epoch| {
        raw_separation(eph, body_a, body_b, t)
            .map(|sep| match_target(sep, target, config.mirror).deviation_deg)
    };
    let refined = refine(deviation, bracket.t_lo, bracket.t_hi, &config.refine)?;

    let actual = raw_separation(eph, body_a, body_b, refined.epoch).map_err(|source| {
        RefineError::Ephemeris {
            epoch: refined.epoch.to_utc(),
            source,
        }
    })?;
    let m = match_target(actual, target, config.mirror);
    debug!(
        "refined {body_a}-{body_b} {target}° to {} (deviation {:.6}°, {} evaluations)",
        refined.epoch, m.deviation_deg, refined.evaluations
    );

    Ok(Hit {
        epoch: refined.epoch,
        body_a,
        body_b,
        target_deg: m.target_deg,
        matched_deg: m.matched_deg,
        actual_deg: actual,
        deviation_deg: m.deviation_deg,
        signed_delta_deg: m.signed_delta_deg,
    })
}

/// Earliest hit of `target` in `[anchor + step, anchor + step + search_days]`.
#[allow(clippy::too_many_arguments)]
pub fn next_match<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    anchor: Epoch,
    target: f64,
    search_days: f64,
    config: &HarmonicConfig,
) -> Result<Option<Hit>, SearchError> {
    validate_search_days(search_days)?;
    let start = anchor.add_seconds(config.step_seconds());
    let end = start.add_days(search_days);
    let hits = scan_harmonics(eph, body_a, body_b, start, end, &[target], config)?;
    Ok(hits.into_iter().next())
}

/// Latest hit of `target` in `[anchor − step − search_days, anchor − step]`.
#[allow(clippy::too_many_arguments)]
pub fn prev_match<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    anchor: Epoch,
    target: f64,
    search_days: f64,
    config: &HarmonicConfig,
) -> Result<Option<Hit>, SearchError> {
    validate_search_days(search_days)?;
    let end = anchor.add_seconds(-config.step_seconds());
    let start = end.add_days(-search_days);
    let hits = scan_harmonics(eph, body_a, body_b, start, end, &[target], config)?;
    Ok(hits.into_iter().next_back())
}

fn validate_search_days(search_days: f64) -> Result<(), SearchError> {
    if !search_days.is_finite() || search_days <= 0.0 {
        return Err(SearchError::InvalidConfig("search_days must be positive"));
    }
    Ok(())
}
