//! Refinement engine: locate the minimum deviation inside a bracket.
//!
//! Both strategies minimize a deviation function `f(t) ≥ 0` over a closed
//! interval. They evaluate the bracket midpoint first and return the best
//! point observed, so the refined deviation is never worse than the
//! midpoint's.

use luminara_core::EngineError;
use luminara_time::Epoch;

use crate::error::RefineError;

/// 1/φ, the golden-section shrink factor.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Interval-shrinking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefineStrategy {
    /// Five-point halving: evaluate quarter points and keep the half
    /// around the best one.
    Bisection,
    /// Classic two-probe golden-section search.
    #[default]
    GoldenSection,
}

/// Refinement tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineParams {
    pub strategy: RefineStrategy,
    pub max_iterations: u32,
    /// Stop once the interval is narrower than this.
    pub time_tolerance_seconds: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            strategy: RefineStrategy::default(),
            max_iterations: 60,
            time_tolerance_seconds: 1.0,
        }
    }
}

impl RefineParams {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.time_tolerance_seconds.is_finite() || self.time_tolerance_seconds <= 0.0 {
            return Err("time_tolerance_seconds must be positive");
        }
        Ok(())
    }
}

/// Best point found inside a bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refined {
    pub epoch: Epoch,
    pub deviation_deg: f64,
    /// Deviation function evaluations spent.
    pub evaluations: u32,
}

/// Running minimum over evaluated points; offsets are seconds from `origin`.
struct Probe<F> {
    eval: F,
    origin: Epoch,
    best_x: f64,
    best_f: f64,
    evaluations: u32,
}

impl<F> Probe<F>
where
    F: FnMut(Epoch) -> Result<f64, EngineError>,
{
    fn new(eval: F, origin: Epoch) -> Self {
        Self {
            eval,
            origin,
            best_x: 0.0,
            best_f: f64::INFINITY,
            evaluations: 0,
        }
    }

    fn at(&mut self, x: f64) -> Result<f64, RefineError> {
        let epoch = self.origin.add_seconds(x);
        let f = (self.eval)(epoch).map_err(|source| RefineError::Ephemeris {
            epoch: epoch.to_utc(),
            source,
        })?;
        if !f.is_finite() {
            return Err(RefineError::NonFinite {
                epoch: epoch.to_utc(),
            });
        }
        self.evaluations += 1;
        // Strict: the first point reaching a value keeps it.
        if f < self.best_f {
            self.best_f = f;
            self.best_x = x;
        }
        Ok(f)
    }

    fn finish(self) -> Refined {
        Refined {
            epoch: self.origin.add_seconds(self.best_x),
            deviation_deg: self.best_f,
            evaluations: self.evaluations,
        }
    }
}

/// Minimize `eval` over `[t_lo, t_hi]`.
///
/// `eval` returns the deviation in degrees; an error or a non-finite value
/// aborts with [`RefineError`].
pub fn refine<F>(
    eval: F,
    t_lo: Epoch,
    t_hi: Epoch,
    params: &RefineParams,
) -> Result<Refined, RefineError>
where
    F: FnMut(Epoch) -> Result<f64, EngineError>,
{
    let (t_lo, t_hi) = if t_hi < t_lo { (t_hi, t_lo) } else { (t_lo, t_hi) };
    let width = t_hi - t_lo;
    let mut probe = Probe::new(eval, t_lo);
    let mid = probe.at(0.5 * width)?;

    match params.strategy {
        RefineStrategy::Bisection => bisection(&mut probe, width, mid, params)?,
        RefineStrategy::GoldenSection => golden_section(&mut probe, width, params)?,
    }
    Ok(probe.finish())
}

fn bisection<F>(
    probe: &mut Probe<F>,
    width: f64,
    f_mid: f64,
    params: &RefineParams,
) -> Result<(), RefineError>
where
    F: FnMut(Epoch) -> Result<f64, EngineError>,
{
    let (mut lo, mut hi) = (0.0, width);
    let mut mid = 0.5 * width;
    let mut f = [0.0; 5];
    f[2] = f_mid;
    if width < params.time_tolerance_seconds {
        return Ok(());
    }
    f[0] = probe.at(lo)?;
    f[4] = probe.at(hi)?;

    for _ in 0..params.max_iterations {
        if hi - lo < params.time_tolerance_seconds {
            break;
        }
        let q1 = 0.5 * (lo + mid);
        let q3 = 0.5 * (mid + hi);
        f[1] = probe.at(q1)?;
        f[3] = probe.at(q3)?;

        let best = (0..5).fold(0, |b, i| if f[i] < f[b] { i } else { b });
        // Keep the half around the best point; ends keep their own half.
        match best {
            0 | 1 => {
                hi = mid;
                mid = q1;
                f = [f[0], 0.0, f[1], 0.0, f[2]];
            }
            2 => {
                lo = q1;
                hi = q3;
                f = [f[1], 0.0, f[2], 0.0, f[3]];
            }
            _ => {
                lo = mid;
                mid = q3;
                f = [f[2], 0.0, f[3], 0.0, f[4]];
            }
        }
    }
    Ok(())
}

fn golden_section<F>(
    probe: &mut Probe<F>,
    width: f64,
    params: &RefineParams,
) -> Result<(), RefineError>
where
    F: FnMut(Epoch) -> Result<f64, EngineError>,
{
    let (mut a, mut b) = (0.0, width);
    if width < params.time_tolerance_seconds {
        return Ok(());
    }
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = probe.at(c)?;
    let mut fd = probe.at(d)?;

    for _ in 0..params.max_iterations {
        if b - a < params.time_tolerance_seconds {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = probe.at(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = probe.at(d)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(strategy: RefineStrategy) -> RefineParams {
        RefineParams {
            strategy,
            ..RefineParams::default()
        }
    }

    fn v_shape(center: f64) -> impl FnMut(Epoch) -> Result<f64, EngineError> {
        move |t| Ok((t.as_utc_seconds() - center).abs() / 3600.0)
    }

    #[test]
    fn both_strategies_find_v_minimum() {
        for strategy in [RefineStrategy::Bisection, RefineStrategy::GoldenSection] {
            let r = refine(
                v_shape(1234.5),
                Epoch::from_utc_seconds(0.0),
                Epoch::from_utc_seconds(3600.0),
                &params(strategy),
            )
            .unwrap();
            assert!(
                (r.epoch.as_utc_seconds() - 1234.5).abs() < 1.0,
                "{strategy:?}: {}",
                r.epoch.as_utc_seconds()
            );
            assert!(r.deviation_deg < 1.0 / 3600.0);
        }
    }

    #[test]
    fn minimum_at_bracket_edge() {
        for strategy in [RefineStrategy::Bisection, RefineStrategy::GoldenSection] {
            let r = refine(
                v_shape(-50.0),
                Epoch::from_utc_seconds(0.0),
                Epoch::from_utc_seconds(3600.0),
                &params(strategy),
            )
            .unwrap();
            assert!(r.epoch.as_utc_seconds() < 2.0, "{strategy:?}: {:?}", r.epoch);
        }
    }

    #[test]
    fn never_worse_than_midpoint() {
        // Non-unimodal: the midpoint is the global minimum, edges dip too.
        let bumpy = |t: Epoch| -> Result<f64, EngineError> {
            let x = t.as_utc_seconds();
            Ok(if (x - 1800.0).abs() < 1.0 { 0.0 } else { 1.0 + (x / 100.0).sin() })
        };
        for strategy in [RefineStrategy::Bisection, RefineStrategy::GoldenSection] {
            let r = refine(
                bumpy,
                Epoch::from_utc_seconds(0.0),
                Epoch::from_utc_seconds(3600.0),
                &params(strategy),
            )
            .unwrap();
            assert_eq!(r.deviation_deg, 0.0, "{strategy:?}");
        }
    }

    #[test]
    fn reversed_bracket_is_accepted() {
        let r = refine(
            v_shape(100.0),
            Epoch::from_utc_seconds(600.0),
            Epoch::from_utc_seconds(0.0),
            &RefineParams::default(),
        )
        .unwrap();
        assert!((r.epoch.as_utc_seconds() - 100.0).abs() < 1.0);
    }

    #[test]
    fn narrow_bracket_evaluates_once() {
        let r = refine(
            v_shape(0.0),
            Epoch::from_utc_seconds(0.0),
            Epoch::from_utc_seconds(0.5),
            &RefineParams::default(),
        )
        .unwrap();
        assert_eq!(r.evaluations, 1);
        assert_eq!(r.epoch.as_utc_seconds(), 0.25);
    }

    #[test]
    fn iteration_cap_is_respected() {
        let capped = RefineParams {
            strategy: RefineStrategy::Bisection,
            max_iterations: 3,
            time_tolerance_seconds: 1e-6,
        };
        let r = refine(
            v_shape(1000.0),
            Epoch::from_utc_seconds(0.0),
            Epoch::from_utc_seconds(3600.0),
            &capped,
        )
        .unwrap();
        // midpoint + two ends + two quarter points per iteration
        assert_eq!(r.evaluations, 3 + 2 * 3);
    }

    #[test]
    fn errors_and_nan_abort() {
        let failing = |_t: Epoch| -> Result<f64, EngineError> { Err(EngineError::Internal("boom".into())) };
        assert!(matches!(
            refine(
                failing,
                Epoch::from_utc_seconds(0.0),
                Epoch::from_utc_seconds(60.0),
                &RefineParams::default()
            ),
            Err(RefineError::Ephemeris { .. })
        ));
        let nan = |_t: Epoch| -> Result<f64, EngineError> { Ok(f64::NAN) };
        assert!(matches!(
            refine(
                nan,
                Epoch::from_utc_seconds(0.0),
                Epoch::from_utc_seconds(60.0),
                &RefineParams::default()
            ),
            Err(RefineError::NonFinite { .. })
        ));
    }

    #[test]
    fn params_validation() {
        assert!(RefineParams::default().validate().is_ok());
        let mut p = RefineParams::default();
        p.max_iterations = 0;
        assert!(p.validate().is_err());
        let mut p = RefineParams::default();
        p.time_tolerance_seconds = 0.0;
        assert!(p.validate().is_err());
    }
}
