//! IAU 2006 general precession in ecliptic longitude.
//!
//! The general precession p_A is the accumulated motion of the equinox
//! along the ecliptic since J2000.0. Adding it to a J2000 ecliptic
//! longitude gives the longitude referred to the mean equinox of date.
//!
//! Source: Capitaine, Wallace & Chapront 2003, _Astronomy & Astrophysics_
//! 412, 567-586 (Table 1).

/// General precession in ecliptic longitude, in arcseconds.
///
/// `t` is Julian centuries of TT since J2000.0. The dominant linear term
/// is ~5028.80″/century.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession in ecliptic longitude, in degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_j2000() {
        assert_eq!(general_precession_longitude_arcsec(0.0), 0.0);
    }

    #[test]
    fn rate_per_year() {
        let p = general_precession_longitude_arcsec(0.01);
        assert!((p - 50.29).abs() < 0.1, "p_A(0.01) = {p}");
    }

    #[test]
    fn antisymmetric_to_first_order() {
        let fwd = general_precession_longitude_arcsec(-1.0);
        assert!(fwd < 0.0, "p_A(-1) = {fwd}");
        assert!((fwd + 5027.69).abs() < 1.0, "p_A(-1) = {fwd}");
    }

    #[test]
    fn degrees_agree_with_arcseconds() {
        let t = 0.24;
        assert!(
            (general_precession_longitude_deg(t) - general_precession_longitude_arcsec(t) / 3600.0)
                .abs()
                < 1e-15
        );
    }
}
