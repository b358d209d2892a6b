//! Frame helpers for the analytic ephemeris.
//!
//! Provides Cartesian ↔ ecliptic spherical conversion and the two
//! corrections that carry a J2000 ecliptic longitude to the true equinox
//! of date: general precession and nutation in longitude.

pub mod nutation;
pub mod precession;
pub mod spherical;

pub use nutation::{fundamental_arguments, nutation_in_longitude_arcsec};
pub use precession::{general_precession_longitude_arcsec, general_precession_longitude_deg};
pub use spherical::{EclipticCoords, cartesian_to_ecliptic, ecliptic_to_cartesian};
