//! Angle function: body longitudes and pair separations.
//!
//! All angles are degrees. Longitudes and directional separations live in
//! `[0, 360)`; unsigned circular distances in `[0, 180]`; signed offsets in
//! `(-180, 180]`.

use luminara_core::{Body, EngineError, Ephemeris};
use luminara_time::Epoch;

use crate::error::SearchError;

/// Normalize an angle to `[0, 360)`.
pub fn normalize_360(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    if d >= 360.0 { 0.0 } else { d }
}

/// Normalize an angle to `(-180, +180]`.
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Shortest angular distance between two directions, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    normalize_to_pm180(a - b).abs()
}

/// Apparent longitude of `body` at `t`, normalized to `[0, 360)`.
pub fn longitude<E: Ephemeris + ?Sized>(eph: &E, body: Body, t: Epoch) -> Result<f64, SearchError> {
    raw_longitude(eph, body, t).map_err(|source| SearchError::Ephemeris {
        epoch: t.to_utc(),
        source,
    })
}

/// Directional separation `(lon_a − lon_b) mod 360` at `t`.
pub fn separation<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    t: Epoch,
) -> Result<f64, SearchError> {
    raw_separation(eph, body_a, body_b, t).map_err(|source| SearchError::Ephemeris {
        epoch: t.to_utc(),
        source,
    })
}

fn raw_longitude<E: Ephemeris + ?Sized>(eph: &E, body: Body, t: Epoch) -> Result<f64, EngineError> {
    let lon = eph.apparent_longitude(body, t)?;
    if !lon.is_finite() {
        return Err(EngineError::Internal(format!(
            "ephemeris returned a non-finite longitude for {body}"
        )));
    }
    Ok(normalize_360(lon))
}

/// Separation with the provider's error left unwrapped, for callers that
/// classify failures themselves.
pub(crate) fn raw_separation<E: Ephemeris + ?Sized>(
    eph: &E,
    body_a: Body,
    body_b: Body,
    t: Epoch,
) -> Result<f64, EngineError> {
    let lon_a = raw_longitude(eph, body_a, t)?;
    let lon_b = raw_longitude(eph, body_b, t)?;
    Ok(normalize_360(lon_a - lon_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64, f64);

    impl Ephemeris for Fixed {
        fn apparent_longitude(&self, body: Body, _epoch: Epoch) -> Result<f64, EngineError> {
            Ok(if body == Body::Sun { self.0 } else { self.1 })
        }
    }

    #[test]
    fn normalize_basic() {
        assert!((normalize_to_pm180(0.0) - 0.0).abs() < 1e-10);
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(270.0) - (-90.0)).abs() < 1e-10);
        assert!((normalize_to_pm180(-270.0) - 90.0).abs() < 1e-10);
        assert!((normalize_to_pm180(450.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_360_domain() {
        assert_eq!(normalize_360(360.0), 0.0);
        assert_eq!(normalize_360(-90.0), 270.0);
        assert_eq!(normalize_360(-1e-18), 0.0);
        assert!((normalize_360(725.5) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn circular_distance_wraps() {
        assert!((circular_distance(10.0, 350.0) - 20.0).abs() < 1e-12);
        assert!((circular_distance(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(180.0, 0.0), 180.0);
    }

    #[test]
    fn circular_distance_range_and_symmetry() {
        for i in 0..72 {
            for j in 0..72 {
                let (a, b) = (i as f64 * 7.3 - 100.0, j as f64 * 11.9 + 3.0);
                let d = circular_distance(a, b);
                assert!((0.0..=180.0).contains(&d), "d({a}, {b}) = {d}");
                assert!((d - circular_distance(b, a)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn separation_is_directional() {
        let eph = Fixed(10.0, 350.0);
        let sep = separation(&eph, Body::Sun, Body::Moon, Epoch::J2000).unwrap();
        assert!((sep - 20.0).abs() < 1e-12);
        let sep = separation(&eph, Body::Moon, Body::Sun, Epoch::J2000).unwrap();
        assert!((sep - 340.0).abs() < 1e-12);
    }

    #[test]
    fn longitude_is_normalized() {
        let eph = Fixed(-30.0, 400.0);
        assert_eq!(longitude(&eph, Body::Sun, Epoch::J2000).unwrap(), 330.0);
        assert_eq!(longitude(&eph, Body::Moon, Epoch::J2000).unwrap(), 40.0);
    }

    #[test]
    fn non_finite_longitude_is_internal_error() {
        let eph = Fixed(f64::NAN, 0.0);
        match longitude(&eph, Body::Sun, Epoch::J2000) {
            Err(SearchError::Ephemeris {
                source: EngineError::Internal(_),
                ..
            }) => {}
            other => panic!("expected internal ephemeris error, got {other:?}"),
        }
    }
}
