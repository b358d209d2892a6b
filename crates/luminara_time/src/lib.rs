//! Time handling for the luminara workspace.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - A `UtcTime` calendar type with parsing and ISO-8601 display
//! - ΔT (TT − UT) from polynomial fits
//! - An `Epoch` type for type-safe instants (UTC seconds past J2000)
//!
//! Leap seconds are not modelled: UTC is treated as a uniform scale and
//! Terrestrial Time is derived from it by adding ΔT.

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod utc_time;

use std::ops::{Add, Sub};
use std::time::Duration;

pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, j2000_seconds_to_jd, jd_to_calendar,
    jd_to_centuries, jd_to_j2000_seconds,
};
pub use utc_time::UtcTime;

/// An instant represented as UTC seconds past J2000.0.
///
/// This is the primary time type used throughout the workspace.
/// It wraps an `f64` providing type safety and convenient conversions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    utc_seconds: f64,
}

impl Epoch {
    /// J2000.0 itself.
    pub const J2000: Self = Self { utc_seconds: 0.0 };

    /// Create an epoch from UTC seconds past J2000.0.
    pub fn from_utc_seconds(s: f64) -> Self {
        Self { utc_seconds: s }
    }

    /// Create an epoch from a Julian Date in UTC.
    pub fn from_jd_utc(jd: f64) -> Self {
        Self {
            utc_seconds: jd_to_j2000_seconds(jd),
        }
    }

    /// Create an epoch from UTC calendar fields.
    pub fn from_utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: f64) -> Self {
        UtcTime::new(year, month, day, hour, min, sec).to_epoch()
    }

    /// UTC seconds past J2000.0.
    pub fn as_utc_seconds(self) -> f64 {
        self.utc_seconds
    }

    /// Julian Date in UTC.
    pub fn as_jd_utc(self) -> f64 {
        j2000_seconds_to_jd(self.utc_seconds)
    }

    /// Julian Date in Terrestrial Time (UTC + ΔT).
    pub fn as_jd_tt(self) -> f64 {
        let jd_utc = self.as_jd_utc();
        let year = 2000.0 + (jd_utc - J2000_JD) / 365.25;
        jd_utc + delta_t_seconds(year) / SECONDS_PER_DAY
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries_tt(self) -> f64 {
        jd_to_centuries(self.as_jd_tt())
    }

    /// Shift by a signed number of seconds.
    pub fn add_seconds(self, s: f64) -> Self {
        Self {
            utc_seconds: self.utc_seconds + s,
        }
    }

    /// Shift by a signed number of days.
    pub fn add_days(self, d: f64) -> Self {
        self.add_seconds(d * SECONDS_PER_DAY)
    }

    /// Same instant rounded to the nearest whole second.
    pub fn rounded_to_second(self) -> Self {
        Self {
            utc_seconds: self.utc_seconds.round(),
        }
    }

    /// Calendar form of this instant.
    pub fn to_utc(self) -> UtcTime {
        UtcTime::from_epoch(self)
    }

    pub fn is_finite(self) -> bool {
        self.utc_seconds.is_finite()
    }
}

impl Sub for Epoch {
    type Output = f64;

    /// Signed difference in seconds.
    fn sub(self, rhs: Self) -> f64 {
        self.utc_seconds - rhs.utc_seconds
    }
}

impl Add<Duration> for Epoch {
    type Output = Epoch;

    fn add(self, rhs: Duration) -> Epoch {
        self.add_seconds(rhs.as_secs_f64())
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_utc().fmt(f)
    }
}

impl From<UtcTime> for Epoch {
    fn from(utc: UtcTime) -> Self {
        utc.to_epoch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_from_jd_roundtrip() {
        let jd = 2_460_000.5;
        let epoch = Epoch::from_jd_utc(jd);
        assert!((epoch.as_jd_utc() - jd).abs() < 1e-12);
    }

    #[test]
    fn epoch_j2000_is_zero() {
        let epoch = Epoch::from_jd_utc(J2000_JD);
        assert_eq!(epoch, Epoch::J2000);
    }

    #[test]
    fn tt_runs_ahead_of_utc() {
        let epoch = Epoch::from_utc(2024, 1, 1, 0, 0, 0.0);
        let lead_s = (epoch.as_jd_tt() - epoch.as_jd_utc()) * SECONDS_PER_DAY;
        assert!((65.0..80.0).contains(&lead_s), "TT − UTC = {lead_s}");
    }

    #[test]
    fn arithmetic() {
        let a = Epoch::from_utc(2024, 1, 1, 0, 0, 0.0);
        let b = a + Duration::from_secs(3600);
        assert_eq!(b - a, 3600.0);
        assert_eq!(a.add_days(1.0) - a, SECONDS_PER_DAY);
        assert!(a < b);
    }

    #[test]
    fn display_is_calendar_form() {
        let epoch = Epoch::from_utc(2024, 3, 20, 3, 6, 0.0);
        assert_eq!(epoch.to_string(), "2024-03-20T03:06:00Z");
    }
}
