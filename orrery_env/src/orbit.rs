//! Circular Keplerian orbits with J2 secular nodal drift.
//!
//! # Example
//!
//! ```ignore
//! use chrono::NaiveTime;
//! use orrery_env::{Instant, Orbit};
//!
//! let epoch = Instant::from_datetime(2020, 1, 1, 0, 0, 0.0)?;
//! let ltdn = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
//! let orbit = Orbit::sun_synchronous(epoch, 500_000.0, ltdn, 0.0)?;
//! ```

use crate::celestial::{EARTH_EQUATORIAL_RADIUS, EARTH_GRAVITATIONAL_PARAMETER, EARTH_J2};
use crate::ephemeris::sun_position;
use crate::error::{EnvError, EnvResult};
use crate::time::Instant;
use chrono::{NaiveTime, Timelike};
use nalgebra::{Point3, Rotation3, Vector3};
use std::f64::consts::TAU;
use std::fmt;

/// Mean rate of the Sun in right ascension (rad/s), one turn per tropical year.
const SUN_SYNCHRONOUS_NODAL_RATE: f64 = TAU / (365.242_189_7 * 86_400.0);

/// Source of position and velocity in GCRF.
pub trait Trajectory: Send + Sync + fmt::Debug {
    /// Position (m) and velocity (m/s) in GCRF at `instant`.
    fn get_position_velocity_at(&self, instant: &Instant) -> EnvResult<(Point3<f64>, Vector3<f64>)>;
}

/// A circular orbit around the Earth.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    epoch: Instant,
    semi_major_axis: f64,
    inclination: f64,
    raan: f64,
    argument_of_latitude: f64,
    mean_motion: f64,
    raan_rate: f64,
}

impl Orbit {
    /// Creates a circular orbit.
    ///
    /// # Arguments
    /// * `epoch` - Instant at which `raan` and `argument_of_latitude` hold
    /// * `altitude` - Height above the equatorial radius (meters)
    /// * `inclination` - Orbit inclination (radians)
    /// * `raan` - Right ascension of the ascending node (radians)
    /// * `argument_of_latitude` - Angle from the ascending node (radians)
    pub fn circular(
        epoch: Instant,
        altitude: f64,
        inclination: f64,
        raan: f64,
        argument_of_latitude: f64,
    ) -> EnvResult<Self> {
        if !(altitude > 0.0) {
            return Err(EnvError::InvalidOrbit(format!(
                "altitude must be positive, got {} m",
                altitude
            )));
        }

        let semi_major_axis = EARTH_EQUATORIAL_RADIUS + altitude;
        let mean_motion = mean_motion(semi_major_axis);
        let raan_rate = nodal_rate_per_cos_inclination(semi_major_axis) * inclination.cos();

        Ok(Self {
            epoch,
            semi_major_axis,
            inclination,
            raan: raan.rem_euclid(TAU),
            argument_of_latitude,
            mean_motion,
            raan_rate,
        })
    }

    /// Creates a circular sun-synchronous orbit.
    ///
    /// The node is placed so that the satellite crosses the equator southbound
    /// at the given local mean solar time.
    ///
    /// # Arguments
    /// * `local_time_at_descending_node` - Local time at the descending node (LTDN)
    pub fn sun_synchronous(
        epoch: Instant,
        altitude: f64,
        local_time_at_descending_node: NaiveTime,
        argument_of_latitude: f64,
    ) -> EnvResult<Self> {
        let semi_major_axis = EARTH_EQUATORIAL_RADIUS + altitude;
        let cos_inclination =
            SUN_SYNCHRONOUS_NODAL_RATE / nodal_rate_per_cos_inclination(semi_major_axis);
        if !(-1.0..=1.0).contains(&cos_inclination) {
            return Err(EnvError::InvalidOrbit(format!(
                "no sun-synchronous inclination exists at {} m",
                altitude
            )));
        }

        let ltdn_hours = f64::from(local_time_at_descending_node.num_seconds_from_midnight()) / 3600.0;
        let ltan_hours = (ltdn_hours + 12.0).rem_euclid(24.0);

        let sun = sun_position(&epoch);
        let sun_right_ascension = sun.y.atan2(sun.x);
        let raan = sun_right_ascension + ((ltan_hours - 12.0) * 15.0).to_radians();

        Self::circular(
            epoch,
            altitude,
            cos_inclination.acos(),
            raan,
            argument_of_latitude,
        )
    }

    pub fn epoch(&self) -> &Instant {
        &self.epoch
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn altitude(&self) -> f64 {
        self.semi_major_axis - EARTH_EQUATORIAL_RADIUS
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Right ascension of the ascending node at `instant`, within `[0, 2π)`.
    pub fn raan_at(&self, instant: &Instant) -> f64 {
        (self.raan + self.raan_rate * instant.seconds_since(&self.epoch)).rem_euclid(TAU)
    }

    /// Orbital period (seconds).
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion
    }
}

impl Trajectory for Orbit {
    fn get_position_velocity_at(&self, instant: &Instant) -> EnvResult<(Point3<f64>, Vector3<f64>)> {
        let elapsed = instant.seconds_since(&self.epoch);
        let u = self.argument_of_latitude + self.mean_motion * elapsed;
        let raan = self.raan_at(instant);

        let orientation = Rotation3::from_axis_angle(&Vector3::z_axis(), raan)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inclination);

        let a = self.semi_major_axis;
        let speed = a * self.mean_motion;

        let position = orientation * Vector3::new(a * u.cos(), a * u.sin(), 0.0);
        // Inertial velocity includes the rotation of the orbit plane
        let velocity = orientation * Vector3::new(-speed * u.sin(), speed * u.cos(), 0.0)
            + (Vector3::z() * self.raan_rate).cross(&position);

        Ok((Point3::from(position), velocity))
    }
}

fn mean_motion(semi_major_axis: f64) -> f64 {
    (EARTH_GRAVITATIONAL_PARAMETER / semi_major_axis.powi(3)).sqrt()
}

/// Secular nodal rate divided by `cos(i)` for a circular orbit.
fn nodal_rate_per_cos_inclination(semi_major_axis: f64) -> f64 {
    let ratio = EARTH_EQUATORIAL_RADIUS / semi_major_axis;
    -1.5 * mean_motion(semi_major_axis) * EARTH_J2 * ratio * ratio
}
