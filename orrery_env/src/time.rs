//! Simulation time: UTC instants and signed durations.

use crate::error::{EnvError, EnvResult};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Signed span of simulation time.
pub type Duration = TimeDelta;

/// Julian date of the J2000 reference epoch.
pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;

/// Julian date of 1970-01-01T00:00:00Z.
const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Builds a [`Duration`] from (possibly fractional) seconds.
///
/// Resolution is one nanosecond, which bounds the span to about ±292 years.
pub fn seconds(value: f64) -> EnvResult<Duration> {
    let nanos = (value * 1e9).round();
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return Err(EnvError::InvalidInstant(format!(
            "duration of {} s is not representable",
            value
        )));
    }
    Ok(TimeDelta::nanoseconds(nanos as i64))
}

/// A single point in simulation time (UTC).
///
/// Time scales are not distinguished: UT1, TT and UTC are treated as equal,
/// which is well within the precision of the environment models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Creates an instant from a calendar date and time of day (UTC).
    ///
    /// # Arguments
    /// * `second` - Seconds within the minute, fractional part allowed
    pub fn from_datetime(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> EnvResult<Self> {
        if !(0.0..60.0).contains(&second) {
            return Err(EnvError::InvalidInstant(format!(
                "second [{}] out of range",
                second
            )));
        }

        let whole = second.trunc() as u32;
        let nanos = ((second - second.trunc()) * 1e9).round() as i64;

        let date_time = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, whole)
            .single()
            .ok_or_else(|| {
                EnvError::InvalidInstant(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid date",
                    year, month, day, hour, minute, whole
                ))
            })?;

        Ok(Self(date_time + TimeDelta::nanoseconds(nanos)))
    }

    /// Wraps a chrono UTC date-time.
    pub fn from_date_time(date_time: DateTime<Utc>) -> Self {
        Self(date_time)
    }

    /// The J2000 epoch (2000-01-01T12:00:00).
    pub fn j2000() -> Self {
        Self(
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    /// Returns the underlying chrono date-time.
    pub fn date_time(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the Julian date of this instant.
    pub fn julian_date(&self) -> f64 {
        let unix_seconds =
            self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) * 1e-9;
        unix_seconds / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DATE
    }

    /// Days elapsed since J2000 (negative before).
    pub fn days_since_j2000(&self) -> f64 {
        self.seconds_since(&Self::j2000()) / SECONDS_PER_DAY
    }

    /// Julian centuries elapsed since J2000.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / 36_525.0
    }

    /// Signed number of seconds from `other` to `self`.
    pub fn seconds_since(&self, other: &Instant) -> f64 {
        let delta = self.0 - other.0;
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
    }

    /// Adds a duration, returning `None` if the result leaves the representable range.
    pub fn checked_add(&self, duration: Duration) -> Option<Instant> {
        self.0.checked_add_signed(duration).map(Self)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0 + rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant(self.0 - rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.0 - rhs.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [UTC]", self.0.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

impl FromStr for Instant {
    type Err = EnvError;

    /// Parses an RFC 3339 timestamp (e.g. `2020-01-01T00:00:00Z`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|date_time| Self(date_time.with_timezone(&Utc)))
            .map_err(|e| EnvError::InvalidInstant(format!("{}: {}", s, e)))
    }
}
