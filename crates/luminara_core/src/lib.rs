//! Body catalogue, ephemeris seam and analytic ephemeris engine.
//!
//! The searchers in `luminara_search` consume positions only through the
//! [`Ephemeris`] trait. This crate ships one implementation, [`Engine`],
//! an analytic low-precision model (mean Keplerian elements for the
//! planets, a truncated lunar theory for the Moon) that needs no data
//! files and is accurate to roughly an arcminute over 1800–2050.

pub mod elements;
pub mod error;
pub mod lunar;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
use luminara_frames::{
    EclipticCoords, cartesian_to_ecliptic, general_precession_longitude_deg,
    nutation_in_longitude_arcsec,
};
use luminara_time::{Epoch, UtcTime};

pub use elements::KeplerElements;
pub use error::EngineError;

/// Light travel time for one AU, in days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Constant of annual aberration, in arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;

/// Kilometres per astronomical unit.
const KM_PER_AU: f64 = 149_597_870.7;

/// Bodies whose geocentric longitude the engine can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Every body, in catalogue order.
    pub const ALL: [Body; 10] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// NAIF-style body code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Moon => 301,
            Self::Mercury => 199,
            Self::Venus => 299,
            Self::Mars => 499,
            Self::Jupiter => 599,
            Self::Saturn => 699,
            Self::Uranus => 799,
            Self::Neptune => 899,
            Self::Pluto => 999,
        }
    }

    /// Convert a NAIF-style body code into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(Self::Sun),
            301 => Some(Self::Moon),
            199 => Some(Self::Mercury),
            299 => Some(Self::Venus),
            499 => Some(Self::Mars),
            599 => Some(Self::Jupiter),
            699 => Some(Self::Saturn),
            799 => Some(Self::Uranus),
            899 => Some(Self::Neptune),
            999 => Some(Self::Pluto),
            _ => None,
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    fn elements(self) -> Option<&'static KeplerElements> {
        match self {
            Self::Sun | Self::Moon => None,
            Self::Mercury => Some(&elements::MERCURY),
            Self::Venus => Some(&elements::VENUS),
            Self::Mars => Some(&elements::MARS),
            Self::Jupiter => Some(&elements::JUPITER),
            Self::Saturn => Some(&elements::SATURN),
            Self::Uranus => Some(&elements::URANUS),
            Self::Neptune => Some(&elements::NEPTUNE),
            Self::Pluto => Some(&elements::PLUTO),
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EngineError;

    /// Accepts a case-insensitive name or a numeric body code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Ok(code) = key.parse::<i32>() {
            return Body::try_from(code);
        }
        Body::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| EngineError::UnknownBody(key.to_string()))
    }
}

impl TryFrom<i32> for Body {
    type Error = EngineError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Body::from_code(code).ok_or_else(|| EngineError::UnknownBody(code.to_string()))
    }
}

/// Source of apparent geocentric ecliptic longitudes.
///
/// Implementations must be deterministic and shareable across threads.
pub trait Ephemeris: Send + Sync {
    /// Apparent geocentric ecliptic longitude of `body` at `epoch`, in
    /// degrees. Callers normalize the value; implementations may return
    /// any finite angle.
    fn apparent_longitude(&self, body: Body, epoch: Epoch) -> Result<f64, EngineError>;
}

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// First instant the engine answers for.
    pub valid_from: UtcTime,
    /// Last instant the engine answers for.
    pub valid_to: UtcTime,
    /// Apply one light-time iteration to planetary positions.
    pub light_time: bool,
    /// Apply annual aberration.
    pub aberration: bool,
    /// Apply nutation in longitude.
    pub nutation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            valid_from: UtcTime::date(1800, 1, 1),
            valid_to: UtcTime::date(2050, 1, 1),
            light_time: true,
            aberration: true,
            nutation: true,
        }
    }
}

impl EngineConfig {
    /// Geometric positions: no light time, aberration or nutation.
    pub fn geometric() -> Self {
        Self {
            light_time: false,
            aberration: false,
            nutation: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.valid_from.validate().is_err() {
            return Err(EngineError::InvalidConfig("valid_from is not a calendar date"));
        }
        if self.valid_to.validate().is_err() {
            return Err(EngineError::InvalidConfig("valid_to is not a calendar date"));
        }
        if self.valid_from.to_epoch() >= self.valid_to.to_epoch() {
            return Err(EngineError::InvalidConfig(
                "valid_from must be earlier than valid_to",
            ));
        }
        Ok(())
    }
}

/// Analytic ephemeris engine.
///
/// `Engine` is immutable after construction and [`Send`] + [`Sync`], so a
/// single instance can be shared across threads by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    range_jd: (f64, f64),
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let range_jd = (config.valid_from.to_jd_utc(), config.valid_to.to_jd_utc());
        debug!(
            "analytic engine ready: {} .. {}, light_time={} aberration={} nutation={}",
            config.valid_from, config.valid_to, config.light_time, config.aberration, config.nutation
        );
        Ok(Self { config, range_jd })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_epoch(&self, epoch: Epoch) -> Result<(), EngineError> {
        if !epoch.is_finite() {
            return Err(EngineError::InvalidQuery("epoch must be finite"));
        }
        let jd_utc = epoch.as_jd_utc();
        if jd_utc < self.range_jd.0 || jd_utc > self.range_jd.1 {
            return Err(EngineError::EpochOutOfRange { jd_utc });
        }
        Ok(())
    }

    /// Geocentric position of `body` referred to the mean ecliptic and
    /// equinox of date. Light time is applied when configured; aberration
    /// and nutation are not.
    pub fn mean_position(&self, body: Body, epoch: Epoch) -> Result<EclipticCoords, EngineError> {
        self.check_epoch(epoch)?;
        Ok(self.mean_position_at(body, epoch.centuries_tt()))
    }

    fn mean_position_at(&self, body: Body, t: f64) -> EclipticCoords {
        if body == Body::Moon {
            let moon = lunar::moon_position(t);
            return EclipticCoords {
                lon_deg: moon.lon_deg,
                lat_deg: moon.lat_deg,
                distance_au: moon.distance_km / KM_PER_AU,
            };
        }

        let earth = elements::EARTH_MOON_BARY.heliocentric_position(t);
        let geocentric = |p: [f64; 3]| [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]];
        let rel = match body.elements() {
            // The Sun sits at the heliocentric origin.
            None => geocentric([0.0; 3]),
            Some(el) => {
                let rel = geocentric(el.heliocentric_position(t));
                if self.config.light_time {
                    let dist = (rel[0] * rel[0] + rel[1] * rel[1] + rel[2] * rel[2]).sqrt();
                    let tau_centuries = dist * LIGHT_TIME_DAYS_PER_AU / 36_525.0;
                    geocentric(el.heliocentric_position(t - tau_centuries))
                } else {
                    rel
                }
            }
        };

        let mut coords = cartesian_to_ecliptic(&rel);
        coords.lon_deg = (coords.lon_deg + general_precession_longitude_deg(t)).rem_euclid(360.0);
        coords
    }

    /// Apparent geocentric ecliptic longitude in `[0, 360)`.
    pub fn longitude(&self, body: Body, epoch: Epoch) -> Result<f64, EngineError> {
        self.check_epoch(epoch)?;
        let t = epoch.centuries_tt();
        let pos = self.mean_position_at(body, t);
        let mut lon = pos.lon_deg;

        // The Moon's aberration is below a milliarcsecond.
        if self.config.aberration && body != Body::Moon {
            let sun_lon = match body {
                Body::Sun => pos.lon_deg,
                _ => self.mean_position_at(Body::Sun, t).lon_deg,
            };
            let cos_lat = pos.lat_deg.to_radians().cos();
            lon -= ABERRATION_ARCSEC / 3600.0 * (sun_lon - pos.lon_deg).to_radians().cos() / cos_lat;
        }
        if self.config.nutation {
            lon += nutation_in_longitude_arcsec(t) / 3600.0;
        }

        if !lon.is_finite() {
            return Err(EngineError::Internal(format!(
                "non-finite longitude for {body} at JD {}",
                epoch.as_jd_utc()
            )));
        }
        Ok(lon.rem_euclid(360.0))
    }
}

impl Ephemeris for Engine {
    fn apparent_longitude(&self, body: Body, epoch: Epoch) -> Result<f64, EngineError> {
        self.longitude(body, epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_codes_roundtrip() {
        for body in Body::ALL {
            assert_eq!(Body::from_code(body.code()), Some(body));
            assert_eq!(body.name().parse::<Body>(), Ok(body));
        }
        assert_eq!(Body::from_code(399), None);
    }

    #[test]
    fn body_parse_accepts_codes_and_case() {
        assert_eq!("Moon".parse::<Body>(), Ok(Body::Moon));
        assert_eq!("599".parse::<Body>(), Ok(Body::Jupiter));
        assert!(matches!(
            "vulcan".parse::<Body>(),
            Err(EngineError::UnknownBody(_))
        ));
        assert!(matches!(Body::try_from(42), Err(EngineError::UnknownBody(_))));
    }

    #[test]
    fn config_rejects_inverted_range() {
        let config = EngineConfig {
            valid_from: UtcTime::date(2050, 1, 1),
            valid_to: UtcTime::date(1800, 1, 1),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_bad_calendar() {
        let config = EngineConfig {
            valid_from: UtcTime::date(2024, 2, 30),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_epoch() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let epoch = Epoch::from_utc(2100, 1, 1, 0, 0, 0.0);
        match engine.longitude(Body::Sun, epoch) {
            Err(EngineError::EpochOutOfRange { jd_utc }) => {
                assert!((jd_utc - epoch.as_jd_utc()).abs() < 1e-9);
            }
            other => panic!("expected EpochOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_epoch() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let epoch = Epoch::from_utc_seconds(f64::NAN);
        assert!(matches!(
            engine.longitude(Body::Moon, epoch),
            Err(EngineError::InvalidQuery(_))
        ));
    }

    #[test]
    fn geometric_config_skips_corrections() {
        let apparent = Engine::new(EngineConfig::default()).unwrap();
        let geometric = Engine::new(EngineConfig::geometric()).unwrap();
        let epoch = Epoch::from_utc(2024, 1, 1, 0, 0, 0.0);
        let a = apparent.longitude(Body::Sun, epoch).unwrap();
        let g = geometric.longitude(Body::Sun, epoch).unwrap();
        // Aberration (−20.5″) plus nutation (a few arcseconds).
        let diff_arcsec = (a - g) * 3600.0;
        assert!((-45.0..0.0).contains(&diff_arcsec), "diff = {diff_arcsec}″");
    }

    // Compile-time assertion: Engine must be Send + Sync.
    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<Engine>();
        }
    };
}
