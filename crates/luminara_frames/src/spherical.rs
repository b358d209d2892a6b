//! Cartesian ↔ ecliptic spherical conversion.

use std::f64::consts::TAU;

/// Ecliptic spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoords {
    /// Longitude in degrees, range [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, range [-90, 90].
    pub lat_deg: f64,
    /// Distance from origin in AU.
    pub distance_au: f64,
}

/// Convert an ecliptic Cartesian vector `[x, y, z]` (AU) to spherical form.
pub fn cartesian_to_ecliptic(xyz: &[f64; 3]) -> EclipticCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();

    if r == 0.0 {
        return EclipticCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance_au: 0.0,
        };
    }

    let lon = y.atan2(x).rem_euclid(TAU);
    EclipticCoords {
        lon_deg: lon.to_degrees(),
        lat_deg: (z / r).asin().to_degrees(),
        distance_au: r,
    }
}

/// Convert ecliptic spherical coordinates back to Cartesian `[x, y, z]` (AU).
pub fn ecliptic_to_cartesian(s: &EclipticCoords) -> [f64; 3] {
    let (sin_lon, cos_lon) = s.lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = s.lat_deg.to_radians().sin_cos();
    [
        s.distance_au * cos_lat * cos_lon,
        s.distance_au * cos_lat * sin_lon,
        s.distance_au * sin_lat,
    ]
}
