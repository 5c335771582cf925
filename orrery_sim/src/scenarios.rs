//! Built-in mission scenarios.

use crate::error::ScenarioError;
use chrono::NaiveTime;
use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use orrery_core::{
    share, ComponentConfiguration, ComponentKind, GeometryConfiguration, SatelliteConfiguration,
    SimulatorConfiguration,
};
use orrery_env::{Environment, Instant, NadirPointing, Orbit, Polygon, Pyramid};
use std::f64::consts::PI;
use std::sync::Arc;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Single nadir-pointing imager on a 500 km sun-synchronous orbit
    LoftSat,

    /// Three imagers phased 120° apart in one sun-synchronous plane
    Constellation,

    /// Imager on a gimbal tilted 30° off nadir, plus a zenith star tracker
    OffNadir,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::LoftSat,
            ScenarioId::Constellation,
            ScenarioId::OffNadir,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::LoftSat => "loft_sat",
            ScenarioId::Constellation => "constellation",
            ScenarioId::OffNadir => "off_nadir",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::LoftSat => "LoftSat-1 camera footprint on Earth, LTDN 14:00",
            ScenarioId::Constellation => "Three phased satellites sharing one orbit plane",
            ScenarioId::OffNadir => "Nested Gimbal/Camera tilted off nadir and a zenith star tracker",
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loft_sat" | "loftsat" => Ok(ScenarioId::LoftSat),
            "constellation" => Ok(ScenarioId::Constellation),
            "off_nadir" | "offnadir" => Ok(ScenarioId::OffNadir),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

const LOFTSAT_ID: &str = "9ea22c07-6977-48a7-8f68-dff758971d57";

const CONSTELLATION_IDS: [&str; 3] = [
    "3f0c5b8e-7a52-4d7e-9b1e-0c6f2a4d8e11",
    "b87d2e41-5c9a-4f03-8e6b-2d1a7c9e5f22",
    "e2a94c17-0d6b-4a8f-b3c5-9f7e1d2b6a33",
];

const OFF_NADIR_ID: &str = "5d7f1a2c-8e3b-4c6d-9a0f-1b2c3d4e5f66";

const ALTITUDE: f64 = 500_000.0;

/// Builds the configuration of `scenario` starting at `epoch`.
pub fn build(scenario: ScenarioId, epoch: Instant) -> Result<SimulatorConfiguration, ScenarioError> {
    let environment = share(Environment::default_at(epoch)?);
    let config = SimulatorConfiguration::new(environment).with_instant(epoch);

    let config = match scenario {
        ScenarioId::LoftSat => config.with_satellite(imager(LOFTSAT_ID, "LoftSat-1", epoch, 0.0)?),
        ScenarioId::Constellation => {
            let mut config = config;
            for (index, id) in CONSTELLATION_IDS.iter().enumerate() {
                let phase = index as f64 * 2.0 * PI / 3.0;
                let name = format!("Loft-{}", index + 1);
                config = config.with_satellite(imager(id, &name, epoch, phase)?);
            }
            config
        }
        ScenarioId::OffNadir => config.with_satellite(off_nadir(epoch)?),
    };

    Ok(config)
}

/// Rectangular field of view with apex at the origin, looking along +z.
///
/// # Arguments
/// * `half_width` - Half extent of the base along x at unit distance
/// * `half_height` - Half extent of the base along y at unit distance
pub fn field_of_view(half_width: f64, half_height: f64) -> Result<Pyramid, ScenarioError> {
    let base = Polygon::from_plane(
        &[
            Point2::new(-half_width, -half_height),
            Point2::new(half_width, -half_height),
            Point2::new(half_width, half_height),
            Point2::new(-half_width, half_height),
        ],
        Point3::new(0.0, 0.0, 1.0),
        Vector3::x(),
        Vector3::y(),
    )?;
    Ok(Pyramid::new(base, Point3::origin())?)
}

fn ltdn() -> Result<NaiveTime, ScenarioError> {
    NaiveTime::from_hms_opt(14, 0, 0)
        .ok_or_else(|| ScenarioError::invalid_setting("local time at descending node"))
}

fn camera() -> Result<ComponentConfiguration, ScenarioError> {
    Ok(ComponentConfiguration::new("", "Camera")
        .with_kind(ComponentKind::Sensor)
        .with_tags(&["imager"])
        .with_geometry(GeometryConfiguration::new("FOV", field_of_view(0.1, 1.0)?)))
}

fn imager(
    id: &str,
    name: &str,
    epoch: Instant,
    argument_of_latitude: f64,
) -> Result<SatelliteConfiguration, ScenarioError> {
    let orbit = Orbit::sun_synchronous(epoch, ALTITUDE, ltdn()?, argument_of_latitude)?;

    Ok(
        SatelliteConfiguration::new(id, name, Arc::new(NadirPointing::new(orbit)))
            .with_tags(&["earth-observation"])
            .with_component(camera()?),
    )
}

fn off_nadir(epoch: Instant) -> Result<SatelliteConfiguration, ScenarioError> {
    let orbit = Orbit::sun_synchronous(epoch, ALTITUDE, ltdn()?, 0.0)?;

    let gimbal = ComponentConfiguration::new("", "Gimbal")
        .with_kind(ComponentKind::Assembly)
        .with_orientation(UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            30f64.to_radians(),
        ))
        .with_component(camera()?);

    let star_tracker = ComponentConfiguration::new("", "StarTracker")
        .with_kind(ComponentKind::Sensor)
        .with_tags(&["attitude"])
        .with_orientation(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
        .with_geometry(GeometryConfiguration::new("FOV", field_of_view(0.2, 0.2)?));

    Ok(
        SatelliteConfiguration::new(OFF_NADIR_ID, "Tilt-1", Arc::new(NadirPointing::new(orbit)))
            .with_component(gimbal)
            .with_component(star_tracker),
    )
}
