//! The simulator: shared environment, satellites and the global time cursor.
//!
//! The current instant lives inside the shared [`Environment`]. Mutators take
//! its write lock; every geometry query takes a single read lock and computes
//! all of its transforms from that one snapshot of the instant.
//!
//! # Example
//!
//! ```ignore
//! let simulator = Simulator::configure(config)?;
//! simulator.step_forward(seconds(60.0)?)?;
//!
//! let satellite = simulator.access_satellite_with_name("LoftSat-1")?;
//! ```

use crate::configuration::SimulatorConfiguration;
use crate::error::{SimResult, SimulationError};
use crate::holder::{ComponentHolder, Mount};
use crate::satellite::Satellite;
use nalgebra::{Isometry3, Translation3};
use orrery_env::{Celestial, Duration, EnvError, Environment, Frame, Instant};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Environment handle shared between a simulator and its callers.
pub type SharedEnvironment = Arc<RwLock<Environment>>;

/// Wraps an environment into a shareable handle.
pub fn share(environment: Environment) -> SharedEnvironment {
    Arc::new(RwLock::new(environment))
}

/// Top-level orchestrator of a simulation.
#[derive(Debug)]
pub struct Simulator {
    environment: Option<SharedEnvironment>,
    satellites: HashMap<String, Satellite>,
}

impl Simulator {
    /// Validates `config` and materializes the runtime tree.
    pub fn configure(config: SimulatorConfiguration) -> SimResult<Self> {
        let mut names = std::collections::HashSet::new();
        let mut ids = std::collections::HashSet::new();
        for satellite in &config.satellites {
            if !names.insert(satellite.name.clone()) {
                return Err(SimulationError::duplicate("satellite name", satellite.name.as_str()));
            }
            if !ids.insert(satellite.id.clone()) {
                return Err(SimulationError::duplicate("satellite id", satellite.id.as_str()));
            }
        }

        let mut satellites = HashMap::with_capacity(config.satellites.len());
        for satellite_config in config.satellites {
            let satellite = Satellite::configure(satellite_config)?;
            satellites.insert(satellite.name()?.to_string(), satellite);
        }

        if let Some(instant) = config.instant {
            config.environment.write().set_instant(instant);
        }

        let simulator = Self {
            environment: Some(config.environment),
            satellites,
        };
        debug!("Configured {}", simulator);

        Ok(simulator)
    }

    pub fn undefined() -> Self {
        Self {
            environment: None,
            satellites: HashMap::new(),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.environment.is_some()
    }

    /// Read/write handle on the shared environment.
    pub fn access_environment(&self) -> SimResult<&SharedEnvironment> {
        self.environment
            .as_ref()
            .ok_or(SimulationError::UndefinedState("Simulator"))
    }

    pub fn access_satellite_map(&self) -> SimResult<&HashMap<String, Satellite>> {
        self.access_environment()?;
        Ok(&self.satellites)
    }

    pub fn has_satellite_with_name(&self, name: &str) -> SimResult<bool> {
        Ok(self.access_satellite_map()?.contains_key(name))
    }

    pub fn access_satellite_with_name(&self, name: &str) -> SimResult<&Satellite> {
        if name.is_empty() {
            return Err(SimulationError::configuration("satellite name is empty"));
        }
        self.access_satellite_map()?
            .get(name)
            .ok_or_else(|| SimulationError::not_found("satellite", name))
    }

    /// Snapshot of a celestial object of the environment.
    pub fn access_celestial_object_with_name(&self, name: &str) -> SimResult<Celestial> {
        let environment = self.access_environment()?.read();
        Ok(environment.access_celestial_object_with_name(name)?.clone())
    }

    pub fn get_instant(&self) -> SimResult<Instant> {
        Ok(self.access_environment()?.read().get_instant())
    }

    pub fn set_instant(&self, instant: Instant) -> SimResult<()> {
        self.access_environment()?.write().set_instant(instant);
        Ok(())
    }

    /// Moves the instant by `duration` (negative durations rewind).
    pub fn step_forward(&self, duration: Duration) -> SimResult<()> {
        let mut environment = self.access_environment()?.write();
        let current = environment.get_instant();
        let next = current.checked_add(duration).ok_or_else(|| {
            EnvError::InvalidInstant(format!("{} + {} is out of range", current, duration))
        })?;
        environment.set_instant(next);
        Ok(())
    }

    /// Adds a configured satellite. Name and id must both be new.
    pub fn add_satellite(&mut self, satellite: Satellite) -> SimResult<()> {
        self.access_environment()?;
        if !satellite.is_defined() {
            return Err(SimulationError::UndefinedState("Satellite"));
        }

        let name = satellite.name()?.to_string();
        let id = satellite.id()?;
        if self.satellites.contains_key(&name) {
            return Err(SimulationError::duplicate("satellite name", name));
        }
        if self.satellites.values().any(|s| s.id().ok() == Some(id)) {
            return Err(SimulationError::duplicate("satellite id", id));
        }

        debug!("Adding satellite [{}]", name);
        self.satellites.insert(name, satellite);
        Ok(())
    }

    /// Frame of the entity at `mount`: the satellite body frame composed with
    /// every component orientation from the root down.
    pub fn resolve_frame(&self, mount: &Mount) -> SimResult<Frame> {
        let satellite = self.access_satellite_with_name(mount.satellite_name())?;
        let mut frame = satellite.access_frame()?;

        let mut children = satellite.access_components()?;
        for name in mount.path() {
            let component = children
                .iter()
                .find(|c| c.name() == name)
                .ok_or_else(|| SimulationError::not_found("component path", mount.to_string()))?;

            frame = Frame::fixed(
                format!("Component [{}]", component.id()),
                &frame,
                Isometry3::from_parts(Translation3::identity(), *component.orientation()),
            );
            children = component.access_components()?;
        }

        Ok(frame)
    }
}

impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(environment) = &self.environment else {
            return write!(f, "Simulator [undefined]");
        };

        writeln!(f, "Simulator @ {}", environment.read().get_instant())?;
        let mut names: Vec<_> = self.satellites.keys().collect();
        names.sort();
        for name in names {
            if let Some(satellite) = self.satellites.get(name) {
                writeln!(f, "  {}", satellite)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;
    use crate::configuration::{ComponentConfiguration, GeometryConfiguration, SatelliteConfiguration};
    use crate::geometry::Intersectable;
    use approx::assert_relative_eq;
    use chrono::NaiveTime;
    use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
    use orrery_env::{seconds, NadirPointing, Object, Orbit, Polygon, Profile, Pyramid, StaticProfile};
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const LOFTSAT_ID: &str = "9ea22c07-6977-48a7-8f68-dff758971d57";

    fn epoch() -> Instant {
        Instant::from_datetime(2020, 1, 1, 0, 0, 0.0).unwrap()
    }

    fn environment() -> SharedEnvironment {
        share(Environment::default_at(epoch()).unwrap())
    }

    fn fov() -> Pyramid {
        let base = Polygon::from_plane(
            &[
                Point2::new(-0.1, -1.0),
                Point2::new(0.1, -1.0),
                Point2::new(0.1, 1.0),
                Point2::new(-0.1, 1.0),
            ],
            Point3::new(0.0, 0.0, 1.0),
            Vector3::x(),
            Vector3::y(),
        )
        .unwrap();
        Pyramid::new(base, Point3::origin()).unwrap()
    }

    fn loftsat(camera_orientation: UnitQuaternion<f64>) -> SatelliteConfiguration {
        let ltdn = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let orbit = Orbit::sun_synchronous(epoch(), 500_000.0, ltdn, 0.0).unwrap();

        SatelliteConfiguration::new(LOFTSAT_ID, "LoftSat-1", Arc::new(NadirPointing::new(orbit)))
            .with_component(
                ComponentConfiguration::new("", "Camera")
                    .with_kind(ComponentKind::Sensor)
                    .with_orientation(camera_orientation)
                    .with_geometry(GeometryConfiguration::new("FOV", fov())),
            )
    }

    fn simulator() -> Simulator {
        let config = SimulatorConfiguration::new(environment())
            .with_satellite(loftsat(UnitQuaternion::identity()));
        Simulator::configure(config).unwrap()
    }

    fn parked(id: &str, name: &str) -> Satellite {
        let profile: Arc<dyn Profile> = Arc::new(StaticProfile::new(
            Point3::new(0.0, 0.0, 1e8),
            UnitQuaternion::identity(),
        ));
        Satellite::configure(SatelliteConfiguration::new(id, name, profile)).unwrap()
    }

    #[test]
    fn test_loftsat_camera_sees_earth() {
        let simulator = simulator();
        let satellite = simulator.access_satellite_with_name("LoftSat-1").unwrap();
        let camera = satellite.access_component_with_name("Camera").unwrap();
        let fov = camera.access_geometry_with_name("FOV").unwrap();
        let earth = simulator.access_celestial_object_with_name("Earth").unwrap();

        assert!(fov.intersects(&simulator, &earth).unwrap());

        let footprint = fov.intersection_with(&simulator, &earth).unwrap();
        assert!(footprint.is_defined());
        assert_eq!(footprint.access_composite().object_count(), 2);
        assert!(footprint
            .access_composite()
            .objects()
            .iter()
            .all(Object::is_line_string));

        assert!(fov.get_geometry_in(&simulator, &Frame::gcrf()).unwrap().is_defined());
        assert!(fov.get_geometry_in(&simulator, &Frame::itrf()).unwrap().is_defined());
    }

    #[test]
    fn test_footprint_lies_on_earth_surface() {
        let simulator = simulator();
        let satellite = simulator.access_satellite_with_name("LoftSat-1").unwrap();
        let fov = satellite
            .access_component_at("Camera")
            .and_then(|c| c.access_geometry_with_name("FOV"))
            .unwrap();
        let earth = simulator.access_celestial_object_with_name("Earth").unwrap();

        let footprint = fov.intersection_with(&simulator, &earth).unwrap();
        let entry = footprint
            .access_composite()
            .access_object_at(0)
            .and_then(Object::as_line_string)
            .unwrap();

        let instant = simulator.get_instant().unwrap();
        let to_itrf = Frame::gcrf().transform_to(&Frame::itrf(), &instant).unwrap();
        for point in entry.points() {
            let radius = (to_itrf * point).coords.norm();
            assert!((6_356_000.0..6_379_000.0).contains(&radius), "radius {}", radius);
        }
    }

    #[test]
    fn test_camera_pointing_away_misses_earth() {
        let flipped = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
        let config = SimulatorConfiguration::new(environment()).with_satellite(loftsat(flipped));
        let simulator = Simulator::configure(config).unwrap();

        let fov = simulator
            .access_satellite_with_name("LoftSat-1")
            .and_then(|s| s.access_component_with_name("Camera"))
            .and_then(|c| c.access_geometry_with_name("FOV"))
            .unwrap();
        let earth = simulator.access_celestial_object_with_name("Earth").unwrap();

        assert!(!fov.intersects(&simulator, &earth).unwrap());
        assert!(fov
            .intersection_with(&simulator, &earth)
            .unwrap()
            .access_composite()
            .is_empty());
    }

    #[test]
    fn test_geometry_frame_is_rebuilt_after_time_moves() {
        let simulator = simulator();
        let fov = simulator
            .access_satellite_with_name("LoftSat-1")
            .and_then(|s| s.access_component_with_name("Camera"))
            .and_then(|c| c.access_geometry_with_name("FOV"))
            .unwrap();

        let apex_at = |simulator: &Simulator| {
            let placed = fov.get_geometry_in(simulator, &Frame::gcrf()).unwrap();
            let pyramid = placed
                .access_composite()
                .access_object_at(0)
                .and_then(Object::as_pyramid)
                .cloned()
                .unwrap();
            *pyramid.apex()
        };

        let before = apex_at(&simulator);
        simulator.step_forward(seconds(600.0).unwrap()).unwrap();
        let after = apex_at(&simulator);

        // Ten minutes at ~7.6 km/s
        assert!((after - before).norm() > 4_000_000.0);
    }

    #[test]
    fn test_geometries_intersect_each_other() {
        let simulator = simulator();
        let fov = simulator
            .access_satellite_with_name("LoftSat-1")
            .and_then(|s| s.access_component_with_name("Camera"))
            .and_then(|c| c.access_geometry_with_name("FOV"))
            .unwrap();

        let error = fov.intersects(&simulator, fov).unwrap_err();
        assert!(matches!(error, SimulationError::Environment(EnvError::UnsupportedIntersection { .. })));

        let placed = fov.object_geometry(&simulator).unwrap();
        assert_eq!(
            placed.access_frame().name(),
            format!("Component [{}]", simulator
                .access_satellite_with_name("LoftSat-1")
                .and_then(|s| s.access_component_with_name("Camera"))
                .unwrap()
                .id())
        );
    }

    #[test]
    fn test_lookup_not_found_at_every_level() {
        let simulator = simulator();

        assert_eq!(
            simulator.access_satellite_with_name("LoftSat-2").unwrap_err(),
            SimulationError::not_found("satellite", "LoftSat-2")
        );

        let satellite = simulator.access_satellite_with_name("LoftSat-1").unwrap();
        assert_eq!(
            satellite.access_component_with_name("Lens").unwrap_err(),
            SimulationError::not_found("component", "Lens")
        );

        let camera = satellite.access_component_with_name("Camera").unwrap();
        assert_eq!(
            camera.access_geometry_with_name("Hull").unwrap_err(),
            SimulationError::not_found("geometry", "Hull")
        );

        assert_eq!(
            simulator.access_celestial_object_with_name("Mars").unwrap_err(),
            SimulationError::not_found("celestial object", "Mars")
        );
    }

    #[test]
    fn test_empty_simulator_then_add() {
        let mut simulator = Simulator::configure(SimulatorConfiguration::new(environment())).unwrap();
        assert!(simulator.access_satellite_map().unwrap().is_empty());

        let satellite = parked(LOFTSAT_ID, "Parked");
        simulator.add_satellite(satellite.clone()).unwrap();

        let map = simulator.access_satellite_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Parked"), Some(&satellite));
        assert!(simulator.has_satellite_with_name("Parked").unwrap());
    }

    #[test]
    fn test_add_duplicate_satellite() {
        let mut simulator = Simulator::configure(SimulatorConfiguration::new(environment())).unwrap();
        simulator.add_satellite(parked(LOFTSAT_ID, "Parked")).unwrap();

        let by_name = simulator.add_satellite(parked("4b1e1c8e-3f1e-4c59-9a3c-4a2e7a3e9d11", "Parked"));
        let by_id = simulator.add_satellite(parked(LOFTSAT_ID, "Other"));

        assert_eq!(by_name, Err(SimulationError::duplicate("satellite name", "Parked")));
        assert_eq!(by_id, Err(SimulationError::duplicate("satellite id", LOFTSAT_ID)));
        assert_eq!(simulator.access_satellite_map().unwrap().len(), 1);
    }

    #[test]
    fn test_add_undefined_satellite() {
        let mut simulator = Simulator::configure(SimulatorConfiguration::new(environment())).unwrap();
        assert_eq!(
            simulator.add_satellite(Satellite::undefined()),
            Err(SimulationError::UndefinedState("Satellite"))
        );
    }

    #[test]
    fn test_configure_rejects_duplicate_names() {
        let config = SimulatorConfiguration::new(environment())
            .with_satellite(loftsat(UnitQuaternion::identity()))
            .with_satellite(loftsat(UnitQuaternion::identity()));

        assert!(matches!(
            Simulator::configure(config),
            Err(SimulationError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_configure_rejects_duplicate_ids() {
        let mut renamed = loftsat(UnitQuaternion::identity());
        renamed.name = "LoftSat-2".to_string();
        let config = SimulatorConfiguration::new(environment())
            .with_satellite(loftsat(UnitQuaternion::identity()))
            .with_satellite(renamed);

        assert_eq!(
            Simulator::configure(config).map(|_| ()),
            Err(SimulationError::duplicate("satellite id", LOFTSAT_ID))
        );
    }

    #[test]
    fn test_component_frames_are_distinct_across_satellites() {
        let ltdn = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let imager = |id: &str, name: &str, phase: f64| {
            let orbit = Orbit::sun_synchronous(epoch(), 500_000.0, ltdn, phase).unwrap();
            SatelliteConfiguration::new(id, name, Arc::new(NadirPointing::new(orbit)))
                .with_component(
                    ComponentConfiguration::new("cam-1", "Camera")
                        .with_kind(ComponentKind::Sensor)
                        .with_geometry(GeometryConfiguration::new("FOV", fov())),
                )
        };
        let config = SimulatorConfiguration::new(environment())
            .with_satellite(imager(LOFTSAT_ID, "A", 0.0))
            .with_satellite(imager("0b7e4c2a-1f3d-4e5a-9c6b-7d8e9f0a1b2c", "B", PI / 2.0));
        let simulator = Simulator::configure(config).unwrap();

        let a = simulator.access_satellite_with_name("A").unwrap();
        let b = simulator.access_satellite_with_name("B").unwrap();
        let fov_a = a
            .access_component_with_name("Camera")
            .and_then(|c| c.access_geometry_with_name("FOV"))
            .unwrap();
        let frame_b = b
            .access_component_with_name("Camera")
            .and_then(|c| c.access_frame(&simulator))
            .unwrap();
        let frame_a = fov_a.access_frame(&simulator).unwrap();
        assert_ne!(frame_a, frame_b);

        let placed = fov_a.get_geometry_in(&simulator, &frame_b).unwrap();
        let apex = placed
            .access_composite()
            .access_object_at(0)
            .and_then(Object::as_pyramid)
            .map(|pyramid| *pyramid.apex())
            .unwrap();

        let instant = simulator.get_instant().unwrap();
        let separation = (a.get_state_at(&instant).unwrap().position
            - b.get_state_at(&instant).unwrap().position)
            .norm();
        assert!(separation > 1e6);
        assert_relative_eq!(apex.coords.norm(), separation, epsilon = 1e-3);
    }

    #[test]
    fn test_configure_instant_override() {
        let later = epoch() + seconds(3600.0).unwrap();
        let shared = environment();
        let config = SimulatorConfiguration::new(Arc::clone(&shared)).with_instant(later);

        let simulator = Simulator::configure(config).unwrap();
        assert_eq!(simulator.get_instant().unwrap(), later);
        // The handle is shared, not copied
        assert_eq!(shared.read().get_instant(), later);
    }

    #[test]
    fn test_undefined_simulator() {
        let simulator = Simulator::undefined();

        assert!(!simulator.is_defined());
        assert_eq!(simulator.get_instant(), Err(SimulationError::UndefinedState("Simulator")));
        assert!(simulator.step_forward(seconds(1.0).unwrap()).is_err());
        assert!(simulator.access_satellite_map().is_err());
        assert_eq!(simulator.to_string(), "Simulator [undefined]");
    }

    #[test]
    fn test_step_backward_rewinds() {
        let simulator = simulator();
        simulator.step_forward(seconds(-30.0).unwrap()).unwrap();
        assert_eq!(simulator.get_instant().unwrap(), epoch() - seconds(30.0).unwrap());
    }

    #[test]
    fn test_display_lists_satellites() {
        let text = simulator().to_string();
        assert!(text.contains("2020-01-01 00:00:00.000 [UTC]"));
        assert!(text.contains("LoftSat-1"));
    }

    proptest! {
        #[test]
        fn test_set_instant_last_write_wins(a in -1.0e8f64..1.0e8, b in -1.0e8f64..1.0e8) {
            let simulator = Simulator::configure(SimulatorConfiguration::new(environment())).unwrap();
            let first = epoch() + seconds(a).unwrap();
            let second = epoch() + seconds(b).unwrap();

            simulator.set_instant(first).unwrap();
            simulator.set_instant(second).unwrap();
            prop_assert_eq!(simulator.get_instant().unwrap(), second);
        }

        #[test]
        fn test_step_forward_is_monotonic(steps in prop::collection::vec(0i64..86_400_000, 1..20)) {
            let simulator = Simulator::configure(SimulatorConfiguration::new(environment())).unwrap();

            for millis in steps {
                let before = simulator.get_instant().unwrap();
                simulator.step_forward(Duration::milliseconds(millis)).unwrap();
                let after = simulator.get_instant().unwrap();

                prop_assert!(after >= before);
                prop_assert_eq!(after == before, millis == 0);
            }
        }
    }
}
