//! Celestial bodies: physical constants plus a shape attached to a frame.

use crate::ephemeris::{moon_position, sun_position};
use crate::error::EnvResult;
use crate::frame::{Frame, TransformProvider};
use crate::geometry::{Composite, Ellipsoid, ObjectGeometry};
use crate::time::Instant;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use std::sync::Arc;

/// WGS84 equatorial radius (meters).
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;
/// Earth gravitational parameter (m^3/s^2).
pub const EARTH_GRAVITATIONAL_PARAMETER: f64 = 3.986_004_418e14;
/// Earth second zonal harmonic.
pub const EARTH_J2: f64 = 1.082_626_68e-3;

const SUN_RADIUS: f64 = 6.957e8;
const SUN_GRAVITATIONAL_PARAMETER: f64 = 1.327_124_400_18e20;
const MOON_RADIUS: f64 = 1.7374e6;
const MOON_GRAVITATIONAL_PARAMETER: f64 = 4.902_800_066e12;

#[derive(Debug, Clone, Copy)]
enum Body {
    Sun,
    Moon,
}

/// Translation of a body-centered frame from GCRF, driven by an ephemeris.
#[derive(Debug)]
struct EphemerisTransform {
    body: Body,
}

impl TransformProvider for EphemerisTransform {
    fn transform_at(&self, instant: &Instant) -> EnvResult<Isometry3<f64>> {
        let position = match self.body {
            Body::Sun => sun_position(instant),
            Body::Moon => moon_position(instant),
        };
        Ok(Isometry3::from_parts(
            Translation3::from(position.coords),
            UnitQuaternion::identity(),
        ))
    }
}

/// A natural body of the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Celestial {
    name: String,
    gravitational_parameter: f64,
    equatorial_radius: f64,
    flattening: f64,
    j2: f64,
    geometry: ObjectGeometry,
}

impl Celestial {
    /// Creates a body whose shape is `ellipsoid` expressed in `frame`.
    pub fn new(
        name: impl Into<String>,
        gravitational_parameter: f64,
        equatorial_radius: f64,
        flattening: f64,
        j2: f64,
        ellipsoid: Ellipsoid,
        frame: Frame,
    ) -> Self {
        Self {
            name: name.into(),
            gravitational_parameter,
            equatorial_radius,
            flattening,
            j2,
            geometry: ObjectGeometry::new(Composite::from(ellipsoid), frame),
        }
    }

    /// The Earth as a WGS84 ellipsoid in ITRF.
    pub fn earth() -> EnvResult<Self> {
        let polar_radius = EARTH_EQUATORIAL_RADIUS * (1.0 - EARTH_FLATTENING);
        let ellipsoid = Ellipsoid::new(
            Point3::origin(),
            EARTH_EQUATORIAL_RADIUS,
            EARTH_EQUATORIAL_RADIUS,
            polar_radius,
            UnitQuaternion::identity(),
        )?;

        Ok(Self::new(
            "Earth",
            EARTH_GRAVITATIONAL_PARAMETER,
            EARTH_EQUATORIAL_RADIUS,
            EARTH_FLATTENING,
            EARTH_J2,
            ellipsoid,
            Frame::itrf(),
        ))
    }

    /// The Sun as a sphere centered on its analytic ephemeris.
    pub fn sun() -> EnvResult<Self> {
        Self::spherical("Sun", SUN_GRAVITATIONAL_PARAMETER, SUN_RADIUS, Body::Sun)
    }

    /// The Moon as a sphere centered on its analytic ephemeris.
    pub fn moon() -> EnvResult<Self> {
        Self::spherical("Moon", MOON_GRAVITATIONAL_PARAMETER, MOON_RADIUS, Body::Moon)
    }

    fn spherical(
        name: &str,
        gravitational_parameter: f64,
        radius: f64,
        body: Body,
    ) -> EnvResult<Self> {
        let frame = Frame::dynamic(name, &Frame::gcrf(), Arc::new(EphemerisTransform { body }));
        Ok(Self::new(
            name,
            gravitational_parameter,
            radius,
            0.0,
            0.0,
            Ellipsoid::sphere(Point3::origin(), radius)?,
            frame,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    pub fn j2(&self) -> f64 {
        self.j2
    }

    pub fn access_geometry(&self) -> &ObjectGeometry {
        &self.geometry
    }

    pub fn access_frame(&self) -> &Frame {
        self.geometry.access_frame()
    }

    /// Center of the body in GCRF at `instant`.
    pub fn position_at(&self, instant: &Instant) -> EnvResult<Point3<f64>> {
        let pose = self.access_frame().transform_to_gcrf(instant)?;
        Ok(Point3::from(pose.translation.vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::ASTRONOMICAL_UNIT;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_is_oblate_in_itrf() {
        let earth = Celestial::earth().unwrap();
        assert_eq!(earth.name(), "Earth");
        assert_eq!(earth.access_frame(), &Frame::itrf());

        let ellipsoid = earth
            .access_geometry()
            .access_composite()
            .access_object_at(0)
            .and_then(|o| o.as_ellipsoid())
            .unwrap();
        assert_relative_eq!(ellipsoid.semi_axes().z, 6_356_752.314, epsilon = 1e-3);
    }

    #[test]
    fn test_sun_frame_follows_ephemeris() {
        let instant = Instant::from_datetime(2020, 1, 1, 0, 0, 0.0).unwrap();
        let sun = Celestial::sun().unwrap();

        let center = sun.position_at(&instant).unwrap();
        assert_relative_eq!(center, sun_position(&instant), epsilon = 1e-3);
        assert!(center.coords.norm() > 0.98 * ASTRONOMICAL_UNIT);
    }
}
