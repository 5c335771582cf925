//! The environment: celestial objects plus the current simulation instant.

use crate::celestial::Celestial;
use crate::error::{EnvError, EnvResult};
use crate::frame::Frame;
use crate::time::Instant;
use nalgebra::Isometry3;
use tracing::debug;

/// Celestial objects and the instant at which they are evaluated.
///
/// The instant is the single time cursor of a simulation: every frame and
/// shape query reads it from here.
#[derive(Debug, Clone)]
pub struct Environment {
    instant: Instant,
    objects: Vec<Celestial>,
}

impl Environment {
    /// Creates an environment from explicit objects.
    pub fn new(instant: Instant, objects: Vec<Celestial>) -> EnvResult<Self> {
        for (index, object) in objects.iter().enumerate() {
            if objects[..index].iter().any(|o| o.name() == object.name()) {
                return Err(EnvError::DuplicateObject(object.name().to_string()));
            }
        }
        Ok(Self { instant, objects })
    }

    /// Earth, Sun and Moon at `instant`.
    pub fn default_at(instant: Instant) -> EnvResult<Self> {
        Self::new(
            instant,
            vec![Celestial::earth()?, Celestial::sun()?, Celestial::moon()?],
        )
    }

    pub fn get_instant(&self) -> Instant {
        self.instant
    }

    pub fn set_instant(&mut self, instant: Instant) {
        debug!("Environment instant {} -> {}", self.instant, instant);
        self.instant = instant;
    }

    pub fn access_objects(&self) -> &[Celestial] {
        &self.objects
    }

    pub fn has_object_with_name(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o.name() == name)
    }

    pub fn access_celestial_object_with_name(&self, name: &str) -> EnvResult<&Celestial> {
        self.objects
            .iter()
            .find(|o| o.name() == name)
            .ok_or_else(|| EnvError::not_found("celestial object", name))
    }

    /// Resolves `GCRF`, `ITRF` or the frame of a named celestial object.
    pub fn access_frame_with_name(&self, name: &str) -> EnvResult<Frame> {
        match name {
            "GCRF" => Ok(Frame::gcrf()),
            "ITRF" => Ok(Frame::itrf()),
            _ => self
                .access_celestial_object_with_name(name)
                .map(|o| o.access_frame().clone())
                .map_err(|_| EnvError::not_found("frame", name)),
        }
    }

    /// Transform from `from` to `to` at the current instant.
    pub fn transform(&self, from: &Frame, to: &Frame) -> EnvResult<Isometry3<f64>> {
        from.transform_to(to, &self.instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::seconds;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn environment() -> Environment {
        Environment::default_at(Instant::from_datetime(2020, 1, 1, 0, 0, 0.0).unwrap()).unwrap()
    }

    #[test]
    fn test_default_objects() {
        let environment = environment();
        let names: Vec<_> = environment.access_objects().iter().map(|o| o.name()).collect();

        assert_eq!(names, vec!["Earth", "Sun", "Moon"]);
        assert!(environment.has_object_with_name("Sun"));
        assert!(!environment.has_object_with_name("Mars"));
    }

    #[test]
    fn test_lookup_missing_object() {
        let environment = environment();
        let result = environment.access_celestial_object_with_name("Mars");
        assert_eq!(result.unwrap_err(), EnvError::not_found("celestial object", "Mars"));
    }

    #[test]
    fn test_set_instant() {
        let mut environment = environment();
        let later = environment.get_instant() + seconds(60.0).unwrap();

        environment.set_instant(later);
        assert_eq!(environment.get_instant(), later);
    }

    #[test]
    fn test_transform_uses_current_instant() {
        let mut environment = environment();
        let probe = Point3::new(7_000_000.0, 0.0, 0.0);

        let before = environment.transform(&Frame::itrf(), &Frame::gcrf()).unwrap() * probe;
        environment.set_instant(environment.get_instant() + seconds(6.0 * 3600.0).unwrap());
        let after = environment.transform(&Frame::itrf(), &Frame::gcrf()).unwrap() * probe;

        // A quarter turn, give or take the sidereal drift
        assert_relative_eq!(before.coords.norm(), after.coords.norm(), epsilon = 1e-6);
        assert!(before.coords.dot(&after.coords).abs() < 0.02 * 7_000_000.0_f64.powi(2));
    }

    #[test]
    fn test_frame_with_name() {
        let environment = environment();
        assert_eq!(environment.access_frame_with_name("ITRF").unwrap(), Frame::itrf());
        assert_eq!(environment.access_frame_with_name("Moon").unwrap().name(), "Moon");
        assert!(environment.access_frame_with_name("Body").is_err());
    }
}
