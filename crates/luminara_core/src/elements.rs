//! Approximate Keplerian elements for the planets.
//!
//! Mean elements referred to the J2000 ecliptic and equinox, each with a
//! linear rate per Julian century. Valid 1800–2050 AD with errors of a
//! few arcminutes at worst (Pluto, Saturn) and well under one arcminute
//! for the inner planets.
//!
//! Source: E. M. Standish, "Keplerian Elements for Approximate Positions
//! of the Major Planets", JPL Solar System Dynamics, Table 1.

/// One row of mean elements: `a` (AU), `e`, `I`, `L`, `ϖ`, `Ω` (degrees),
/// with the matching rates per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerElements {
    pub base: [f64; 6],
    pub rate: [f64; 6],
}

#[rustfmt::skip]
pub const MERCURY: KeplerElements = KeplerElements {
    base: [ 0.38709927, 0.20563593,  7.00497902, 252.25032350,  77.45779628,  48.33076593],
    rate: [ 0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};
#[rustfmt::skip]
pub const VENUS: KeplerElements = KeplerElements {
    base: [ 0.72333566, 0.00677672,  3.39467605, 181.97909950, 131.60246718,  76.67984255],
    rate: [ 0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};
/// Earth–Moon barycenter.
#[rustfmt::skip]
pub const EARTH_MOON_BARY: KeplerElements = KeplerElements {
    base: [ 1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [ 0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};
#[rustfmt::skip]
pub const MARS: KeplerElements = KeplerElements {
    base: [ 1.52371034, 0.09339410,  1.84969142,  -4.55343205, -23.94362959,  49.55953891],
    rate: [ 0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};
#[rustfmt::skip]
pub const JUPITER: KeplerElements = KeplerElements {
    base: [ 5.20288700, 0.04838624,  1.30439695,  34.39644051,  14.72847983, 100.47390909],
    rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668,  0.20469106],
};
#[rustfmt::skip]
pub const SATURN: KeplerElements = KeplerElements {
    base: [ 9.53667594, 0.05386179,  2.48599187,  49.95424423,  92.59887831, 113.66242448],
    rate: [-0.00125060, -0.00050991,  0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};
#[rustfmt::skip]
pub const URANUS: KeplerElements = KeplerElements {
    base: [19.18916464, 0.04725744,  0.77263783, 313.23810451, 170.95427630,  74.01692503],
    rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281,  0.04240589],
};
#[rustfmt::skip]
pub const NEPTUNE: KeplerElements = KeplerElements {
    base: [30.06992276, 0.00859048,  1.77004347, -55.12002969,  44.96476227, 131.78422574],
    rate: [ 0.00026291, 0.00005105,  0.00035372, 218.45945325, -0.32241464, -0.00508664],
};
#[rustfmt::skip]
pub const PLUTO: KeplerElements = KeplerElements {
    base: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
    rate: [-0.00031596, 0.00005170,  0.00004818, 145.20780515, -0.04062942, -0.01183482],
};

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOL: f64 = 1e-12;

/// Solve Kepler's equation `M = E − e·sin E` for `E` (radians) by Newton
/// iteration.
pub fn solve_kepler(mean_anomaly_rad: f64, e: f64) -> f64 {
    let m = mean_anomaly_rad;
    let mut ecc_anom = m + e * m.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ecc_anom - e * ecc_anom.sin() - m) / (1.0 - e * ecc_anom.cos());
        ecc_anom -= delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }
    ecc_anom
}

impl KeplerElements {
    /// Heliocentric J2000 ecliptic position `[x, y, z]` in AU.
    ///
    /// `t` is Julian centuries of TT since J2000.0.
    pub fn heliocentric_position(&self, t: f64) -> [f64; 3] {
        let el: [f64; 6] = std::array::from_fn(|i| self.base[i] + self.rate[i] * t);
        let [a, e, incl, mean_lon, lon_peri, node] = el;

        let arg_peri = (lon_peri - node).to_radians();
        let mean_anom = (mean_lon - lon_peri + 180.0).rem_euclid(360.0) - 180.0;
        let ecc_anom = solve_kepler(mean_anom.to_radians(), e);

        // Orbital-plane coordinates, x' toward perihelion.
        let xp = a * (ecc_anom.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ecc_anom.sin();

        let (sw, cw) = arg_peri.sin_cos();
        let (so, co) = node.to_radians().sin_cos();
        let (si, ci) = incl.to_radians().sin_cos();

        [
            (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
            (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
            (sw * si) * xp + (cw * si) * yp,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn kepler_circular_orbit_is_identity() {
        assert_abs_diff_eq!(solve_kepler(1.234, 0.0), 1.234, epsilon = 1e-15);
    }

    #[test]
    fn kepler_satisfies_equation() {
        for &e in &[0.0167, 0.2056, 0.2488] {
            for i in 0..12 {
                let m = -3.0 + i as f64 * 0.5;
                let ea = solve_kepler(m, e);
                assert_abs_diff_eq!(ea - e * ea.sin(), m, epsilon = 1e-11);
            }
        }
    }

    #[test]
    fn radius_stays_between_apsides() {
        for elements in [MERCURY, EARTH_MOON_BARY, MARS, PLUTO] {
            let (a, e) = (elements.base[0], elements.base[1]);
            for i in 0..40 {
                let p = elements.heliocentric_position(-2.0 + i as f64 * 0.1);
                let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
                assert!(r > a * (1.0 - e) * 0.99 && r < a * (1.0 + e) * 1.01, "r = {r}");
            }
        }
    }

    #[test]
    fn earth_orbit_is_nearly_in_ecliptic() {
        let p = EARTH_MOON_BARY.heliocentric_position(0.24);
        assert!(p[2].abs() < 1e-4, "z = {}", p[2]);
    }
}
