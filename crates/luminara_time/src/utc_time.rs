//! UTC calendar date/time with sub-second precision.
//!
//! `UtcTime` is the human-facing form of an [`Epoch`]. Conversions go
//! through whole days plus seconds-of-day so that integral-second epochs
//! map to integral-second calendar values without rounding drift.

use std::str::FromStr;

use crate::Epoch;
use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, days_in_month, jd_to_calendar};

/// JD of 2000-01-01T00:00:00, the day boundary preceding J2000.0.
const JD_2000_MIDNIGHT: f64 = 2_451_544.5;

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of a calendar day.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Check every calendar field against its range.
    pub fn validate(&self) -> Result<(), TimeError> {
        let max_day = days_in_month(self.year, self.month)
            .ok_or(TimeError::InvalidCalendar("month must be in 1..=12"))?;
        if self.day == 0 || self.day > max_day {
            return Err(TimeError::InvalidCalendar("day is outside the month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidCalendar("hour must be in 0..=23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidCalendar("minute must be in 0..=59"));
        }
        if !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidCalendar("second must be in [0, 60)"));
        }
        Ok(())
    }

    /// Convert to an [`Epoch`].
    pub fn to_epoch(&self) -> Epoch {
        let midnight_jd = calendar_to_jd(self.year, self.month, self.day as f64);
        let whole_days = (midnight_jd - JD_2000_MIDNIGHT).round();
        let seconds_of_day =
            self.hour as f64 * 3600.0 + self.minute as f64 * 60.0 + self.second;
        Epoch::from_utc_seconds(whole_days * SECONDS_PER_DAY - SECONDS_PER_DAY / 2.0 + seconds_of_day)
    }

    /// Convert from an [`Epoch`].
    pub fn from_epoch(epoch: Epoch) -> Self {
        let since_midnight = epoch.as_utc_seconds() + SECONDS_PER_DAY / 2.0;
        let whole_days = (since_midnight / SECONDS_PER_DAY).floor();
        let mut seconds_of_day = since_midnight - whole_days * SECONDS_PER_DAY;
        // Guard against f64 residue pushing a value onto the next day.
        if seconds_of_day >= SECONDS_PER_DAY {
            seconds_of_day = SECONDS_PER_DAY - 1e-9;
        }
        let (year, month, day_frac) = jd_to_calendar(JD_2000_MIDNIGHT + whole_days);
        let hour = (seconds_of_day / 3600.0).floor() as u32;
        let minute = ((seconds_of_day - hour as f64 * 3600.0) / 60.0).floor() as u32;
        let second = seconds_of_day - hour as f64 * 3600.0 - minute as f64 * 60.0;
        Self {
            year,
            month,
            day: day_frac.round() as u32,
            hour,
            minute,
            second,
        }
    }

    /// Julian Date on the UTC scale.
    pub fn to_jd_utc(&self) -> f64 {
        self.to_epoch().as_jd_utc()
    }

    /// Same instant rounded to the nearest whole second.
    pub fn rounded_to_second(&self) -> Self {
        Self::from_epoch(self.to_epoch().rounded_to_second())
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDThh:mm`, `YYYY-MM-DDThh:mm:ss[.fff]`,
    /// with an optional trailing `Z` and either `T` or a space as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| TimeError::Parse {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = s.trim().trim_end_matches('Z');
        let (date_part, time_part) = match trimmed.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (trimmed, None),
        };

        let date_fields: Vec<&str> = date_part.split('-').collect();
        if date_fields.len() != 3 {
            return Err(fail("expected YYYY-MM-DD"));
        }
        let year: i32 = date_fields[0].parse().map_err(|_| fail("bad year"))?;
        let month: u32 = date_fields[1].parse().map_err(|_| fail("bad month"))?;
        let day: u32 = date_fields[2].parse().map_err(|_| fail("bad day"))?;

        let (hour, minute, second) = match time_part {
            None => (0, 0, 0.0),
            Some(t) => {
                let fields: Vec<&str> = t.split(':').collect();
                if fields.len() < 2 || fields.len() > 3 {
                    return Err(fail("expected hh:mm or hh:mm:ss"));
                }
                let hour: u32 = fields[0].parse().map_err(|_| fail("bad hour"))?;
                let minute: u32 = fields[1].parse().map_err(|_| fail("bad minute"))?;
                let second: f64 = match fields.get(2) {
                    Some(sec) => sec.parse().map_err(|_| fail("bad second"))?,
                    None => 0.0,
                };
                (hour, minute, second)
            }
        };

        let utc = Self::new(year, month, day, hour, minute, second);
        utc.validate()?;
        Ok(utc)
    }
}
